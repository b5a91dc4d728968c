//! Observability side channel.
//!
//! Events carry no control-flow meaning; dropping them is always safe.

use tokio::sync::broadcast;

use crate::http::HttpMethod;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    RequestSent {
        method: HttpMethod,
        uri: String,
        body: Option<String>,
    },
    ResponseReceived {
        uri: String,
        body: String,
    },
    OperationFailed {
        uri: String,
        message: String,
    },
}

pub struct EventBus {
    sender: broadcast::Sender<EngineEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.sender.subscribe()
    }

    /// Never blocks; a send with no subscribers is not an error here.
    pub fn publish(&self, event: EngineEvent) {
        let _ = self.sender.send(event);
    }
}
