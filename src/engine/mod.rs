//! Command execution: dispatch, classification and id extraction.
//!
//! Every facade operation ends up in [`Engine::get`], [`Engine::get_list`]
//! or [`Engine::mutate`].

pub mod classify;
pub mod extract;
pub mod uri;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::auth::Credential;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::events::{EngineEvent, EventBus};
use crate::http::{ApiRequest, HttpMethod, Transport};
use crate::outcome::{MutationResult, Outcome};

use classify::{RawOutcome, classify, classify_fault, parse_list, parse_object};
use extract::extract_id;
use uri::Command;

const JSON: &str = "application/json";

pub struct Engine {
    transport: Arc<dyn Transport>,
    api_root: String,
    credential: Credential,
    events: EventBus,
}

impl Engine {
    pub fn new(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_root: config.api_root(),
            credential: Credential::basic(&config.username, &config.password),
            events: EventBus::new(config.event_capacity),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Absolute URL for an endpoint route and its query.
    ///
    /// Under a prefix that already holds the `?` (`index.php?/api/v2/`), the
    /// query is joined with `&`.
    pub fn qualify(&self, route: &str, query: Option<&str>) -> String {
        match query {
            Some(query) => {
                let separator = if self.api_root.contains('?') { '&' } else { '?' };
                format!("{}{route}{separator}{query}", self.api_root)
            }
            None => format!("{}{route}", self.api_root),
        }
    }

    fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            "Authorization".to_string(),
            self.credential.header_value().to_string(),
        );
        headers.insert("Accept".to_string(), JSON.to_string());
        headers.insert("Content-Type".to_string(), JSON.to_string());
        headers
    }

    /// Sends one request. Transport failures come back inside the outcome.
    pub async fn invoke(&self, command: &Command, body: Option<&Value>) -> RawOutcome {
        let method = HttpMethod::from(command.verb);
        let uri = self.qualify(&command.route(), command.query());
        let body = body.map(Value::to_string);

        tracing::debug!(%method, %uri, has_body = body.is_some(), "sending request");
        self.events.publish(EngineEvent::RequestSent {
            method,
            uri: uri.clone(),
            body: body.clone(),
        });

        let request = ApiRequest {
            method,
            url: uri.clone(),
            headers: self.headers(),
            body,
        };

        let result = match self.transport.execute(request).await {
            Ok(reply) => {
                tracing::debug!(%uri, status = reply.status, "response received");
                self.events.publish(EngineEvent::ResponseReceived {
                    uri: uri.clone(),
                    body: reply.body.clone(),
                });
                Ok(reply.body)
            }
            Err(fault) => {
                tracing::warn!(%uri, status = ?fault.status, error = %fault.message, "request failed");
                self.events.publish(EngineEvent::OperationFailed {
                    uri: uri.clone(),
                    message: fault.message.clone(),
                });
                Err(fault)
            }
        };

        RawOutcome { uri, result }
    }

    pub async fn get<T>(&self, command: &Command) -> Result<Outcome<T>, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.invoke(command, None).await;
        classify(raw, parse_object::<T>)
    }

    pub async fn get_list<T>(&self, command: &Command) -> Result<Outcome<Vec<T>>, ClientError>
    where
        T: DeserializeOwned,
    {
        let list_key = command.resource.list_key();
        let raw = self.invoke(command, None).await;
        classify(raw, |body| parse_list(body, list_key))
    }

    pub async fn mutate(
        &self,
        command: &Command,
        body: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let raw = self.invoke(command, body).await;
        match raw.result {
            Ok(body) => Ok(MutationResult::success(extract_id(&body))),
            Err(fault) => {
                let (status, fault) = classify_fault(fault)?;
                Ok(MutationResult::failure(status, fault))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportFault;
    use crate::outcome::StatusCode;
    use crate::testing::ScriptedTransport;
    use uri::{Resource, Verb};

    fn engine(transport: Arc<ScriptedTransport>) -> Engine {
        let config = ClientConfig::new("https://acme.testrail.io", "qa@acme.io", "key");
        Engine::new(&config, transport)
    }

    #[test]
    fn qualify_swaps_query_separator_under_index_php() {
        let engine = engine(Arc::new(ScriptedTransport::new()));
        assert_eq!(
            engine.qualify("get_cases/1", Some("suite_id=2")),
            "https://acme.testrail.io/index.php?/api/v2/get_cases/1&suite_id=2"
        );
        assert_eq!(
            engine.qualify("get_project/1", None),
            "https://acme.testrail.io/index.php?/api/v2/get_project/1"
        );

        let config = ClientConfig {
            api_prefix: "api/v2/".into(),
            ..ClientConfig::new("http://localhost", "u", "p")
        };
        let engine = Engine::new(&config, Arc::new(ScriptedTransport::new()));
        assert_eq!(
            engine.qualify("get_cases/1", Some("suite_id=2")),
            "http://localhost/api/v2/get_cases/1?suite_id=2"
        );
    }

    #[tokio::test]
    async fn question_mark_in_entry_key_is_left_alone() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok("{}");
        transport.reply_ok("[]");
        let engine = engine(transport.clone());

        let delete = Command::new(Verb::Delete, Resource::PlanEntry)
            .id(5)
            .secondary_key("ab?cd");
        engine.invoke(&delete, None).await;
        let list = Command::get(Resource::Results).id(7).param("limit", 3);
        engine.invoke(&list, None).await;

        let urls = transport.urls();
        assert_eq!(
            urls[0],
            "https://acme.testrail.io/index.php?/api/v2/delete_plan_entry/5/ab?cd"
        );
        assert_eq!(
            urls[1],
            "https://acme.testrail.io/index.php?/api/v2/get_results/7&limit=3"
        );
    }

    #[tokio::test]
    async fn invoke_sends_fixed_headers_once() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"{"id":1}"#);
        let engine = engine(transport.clone());

        let body = serde_json::json!({"title": "A"});
        let command = Command::new(Verb::Add, Resource::Case).id(3);
        let raw = engine.invoke(&command, Some(&body)).await;

        assert!(raw.is_success());
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers["Accept"], "application/json");
        assert_eq!(request.headers["Content-Type"], "application/json");
        assert!(request.headers["Authorization"].starts_with("Basic "));
        assert_eq!(request.body.as_deref(), Some(r#"{"title":"A"}"#));
    }

    #[tokio::test]
    async fn events_bracket_each_call() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok("{}");
        transport.reply_err(TransportFault::with_status(500, "(500) Internal Server Error"));
        let engine = engine(transport);
        let mut rx = engine.subscribe();

        engine.invoke(&Command::get(Resource::Project).id(1), None).await;
        engine.invoke(&Command::get(Resource::Project).id(2), None).await;

        match rx.recv().await.unwrap() {
            EngineEvent::RequestSent { method, uri, body } => {
                assert_eq!(method, HttpMethod::Get);
                assert!(uri.ends_with("get_project/1"));
                assert!(body.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(matches!(rx.recv().await.unwrap(), EngineEvent::ResponseReceived { .. }));
        assert!(matches!(rx.recv().await.unwrap(), EngineEvent::RequestSent { .. }));
        match rx.recv().await.unwrap() {
            EngineEvent::OperationFailed { message, .. } => {
                assert!(message.contains("500"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn mutate_extracts_id_or_classifies() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"{"id": 42, "title": "A"}"#);
        transport.reply_err(TransportFault::new("The remote server returned an error: (403) Forbidden."));
        transport.reply_err(TransportFault::new("connection refused"));
        let engine = engine(transport);
        let command = Command::new(Verb::Update, Resource::Case).id(42);

        let result = engine.mutate(&command, None).await.unwrap();
        assert!(result.succeeded);
        assert_eq!(result.id, 42);

        let result = engine.mutate(&command, None).await.unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.status, StatusCode::Forbidden);

        assert!(matches!(
            engine.mutate(&command, None).await,
            Err(ClientError::Unclassified(_))
        ));
    }

    #[tokio::test]
    async fn get_list_unwraps_paginated_reply() {
        #[derive(Debug, serde::Deserialize)]
        struct Row {
            id: u64,
        }

        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"{"offset":0,"limit":250,"size":2,"runs":[{"id":1},{"id":2}]}"#);
        let engine = engine(transport);

        let outcome = engine
            .get_list::<Row>(&Command::get(Resource::Runs).id(1))
            .await
            .unwrap();
        let ids: Vec<u64> = outcome.into_payload().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
