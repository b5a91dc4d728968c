//! # Testing support
//!
//! [`ScriptedTransport`] replays queued replies in order and records every
//! request it sees, so client behavior can be checked without a server.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::TransportFault;
use crate::http::{ApiReply, ApiRequest, Transport, TransportFuture};

#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ApiReply, TransportFault>>>,
    requests: Mutex<Vec<ApiRequest>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds every reply back for `delay` before returning it.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn reply_ok(&self, body: impl Into<String>) {
        self.push(Ok(ApiReply::ok(body)));
    }

    pub fn reply_json(&self, body: &serde_json::Value) {
        self.reply_ok(body.to_string());
    }

    pub fn reply_err(&self, fault: TransportFault) {
        self.push(Err(fault));
    }

    /// Queues a non-2xx reply the way a real transport reports it.
    pub fn reply_status(&self, status: u16) {
        self.reply_err(TransportFault::with_status(
            status,
            format!("The remote server returned an error: ({status})."),
        ));
    }

    fn push(&self, reply: Result<ApiReply, TransportFault>) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// URLs of recorded requests, oldest first.
    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(TransportFault::new("no scripted reply left")));
        let delay = self.delay;

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            reply
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use std::collections::HashMap;

    fn request(url: &str) -> ApiRequest {
        ApiRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn replays_in_order_then_runs_dry() {
        let transport = ScriptedTransport::new();
        transport.reply_ok("first");
        transport.reply_status(404);

        assert_eq!(transport.execute(request("a")).await.unwrap().body, "first");
        assert_eq!(transport.execute(request("b")).await.unwrap_err().status, Some(404));
        assert_eq!(transport.execute(request("c")).await.unwrap_err().status, None);

        assert_eq!(transport.calls(), 3);
        assert_eq!(transport.urls(), vec!["a", "b", "c"]);
    }
}
