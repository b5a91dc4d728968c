use serde_json::{Value, json};

use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource, Verb};
use crate::error::ClientError;
use crate::models::TestResult;
use crate::outcome::{MutationResult, Outcome};
use crate::payload::merge_custom;

fn limited(command: Command, limit: Option<u32>) -> Command {
    match limit {
        Some(limit) => command.param("limit", limit),
        None => command,
    }
}

impl TestRailClient {
    /// Results of one test, newest first, at most `limit` of them.
    pub async fn get_results(
        &self,
        test_id: u64,
        limit: Option<u32>,
    ) -> Result<Outcome<Vec<TestResult>>, ClientError> {
        let command = limited(Command::get(Resource::Results).id(test_id), limit);
        self.engine.get_list(&command).await
    }

    pub async fn get_results_for_case(
        &self,
        run_id: u64,
        case_id: u64,
        limit: Option<u32>,
    ) -> Result<Outcome<Vec<TestResult>>, ClientError> {
        let command = limited(
            Command::get(Resource::ResultsForCase)
                .id(run_id)
                .secondary_id(case_id),
            limit,
        );
        self.engine.get_list(&command).await
    }

    pub async fn get_results_for_run(
        &self,
        run_id: u64,
        limit: Option<u32>,
    ) -> Result<Outcome<Vec<TestResult>>, ClientError> {
        let command = limited(Command::get(Resource::ResultsForRun).id(run_id), limit);
        self.engine.get_list(&command).await
    }

    pub async fn add_result(
        &self,
        test_id: u64,
        result: &TestResult,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let body = merge_custom(result.to_payload(), custom);
        self.engine
            .mutate(&Command::new(Verb::Add, Resource::Result).id(test_id), Some(&body))
            .await
    }

    pub async fn add_result_for_case(
        &self,
        run_id: u64,
        case_id: u64,
        result: &TestResult,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let mut base = result.to_payload();
        if let Value::Object(map) = &mut base {
            map.remove("case_id");
        }
        let body = merge_custom(base, custom);
        self.engine
            .mutate(
                &Command::new(Verb::Add, Resource::ResultForCase)
                    .id(run_id)
                    .secondary_id(case_id),
                Some(&body),
            )
            .await
    }

    /// Bulk results keyed by test id. Each result needs `test_id`.
    pub async fn add_results(
        &self,
        run_id: u64,
        results: &[TestResult],
    ) -> Result<MutationResult, ClientError> {
        if results.iter().any(|r| r.test_id.is_none()) {
            return Ok(MutationResult::rejected("every result needs a test id"));
        }
        let rows: Vec<Value> = results
            .iter()
            .map(|r| {
                let mut row = r.to_payload();
                if let Value::Object(map) = &mut row {
                    map.insert("test_id".to_string(), json!(r.test_id));
                }
                row
            })
            .collect();
        let body = json!({ "results": rows });
        self.engine
            .mutate(&Command::new(Verb::Add, Resource::Results).id(run_id), Some(&body))
            .await
    }

    /// Bulk results keyed by case id. Each result needs `case_id`.
    pub async fn add_results_for_cases(
        &self,
        run_id: u64,
        results: &[TestResult],
    ) -> Result<MutationResult, ClientError> {
        if results.iter().any(|r| r.case_id.is_none()) {
            return Ok(MutationResult::rejected("every result needs a case id"));
        }
        let rows: Vec<Value> = results.iter().map(TestResult::to_payload).collect();
        let body = json!({ "results": rows });
        self.engine
            .mutate(
                &Command::new(Verb::Add, Resource::ResultsForCases).id(run_id),
                Some(&body),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{client, sent_body};
    use crate::models::ResultStatus;
    use crate::outcome::StatusCode;
    use crate::testing::ScriptedTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn result_queries_carry_limit() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"[{"id":1,"test_id":5,"status_id":1}]"#);
        transport.reply_ok(r#"{"offset":0,"results":[]}"#);
        let client = client(transport.clone());

        let results = client.get_results_for_case(3, 44, Some(10)).await.unwrap();
        client.get_results_for_run(3, None).await.unwrap();

        let results = results.into_payload().unwrap();
        assert_eq!(results[0].status(), Some(ResultStatus::Passed));
        let urls = transport.urls();
        assert!(urls[0].ends_with("get_results_for_case/3/44&limit=10"));
        assert!(urls[1].ends_with("get_results_for_run/3"));
    }

    #[tokio::test]
    async fn add_result_for_case_posts_payload() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"{"id": 900, "test_id": 5}"#);
        let client = client(transport.clone());

        let result = TestResult {
            comment: Some("timeout on login".into()),
            ..TestResult::with_status(ResultStatus::Failed)
        };
        let outcome = client
            .add_result_for_case(3, 44, &result, Some(&json!({"custom_browser": "firefox"})))
            .await
            .unwrap();

        assert_eq!(outcome.id, 900);
        assert!(transport.urls()[0].ends_with("add_result_for_case/3/44"));
        assert_eq!(
            sent_body(&transport, 0),
            json!({"status_id": 5, "comment": "timeout on login", "custom_browser": "firefox"})
        );
    }

    #[tokio::test]
    async fn bulk_results_by_case_need_case_ids() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"[{"id": 1}, {"id": 2}]"#);
        let client = client(transport.clone());

        let missing = client
            .add_results_for_cases(3, &[TestResult::with_status(ResultStatus::Passed)])
            .await
            .unwrap();
        assert_eq!(missing.status, StatusCode::BadRequest);
        assert_eq!(transport.calls(), 0);

        let rows = vec![
            TestResult {
                case_id: Some(10),
                ..TestResult::with_status(ResultStatus::Passed)
            },
            TestResult {
                case_id: Some(11),
                ..TestResult::with_status(ResultStatus::Blocked)
            },
        ];
        let result = client.add_results_for_cases(3, &rows).await.unwrap();

        assert!(result.succeeded);
        assert_eq!(result.id, 0);
        assert_eq!(
            sent_body(&transport, 0),
            json!({"results": [
                {"case_id": 10, "status_id": 1},
                {"case_id": 11, "status_id": 2}
            ]})
        );
    }

    #[tokio::test]
    async fn bulk_results_by_test_include_test_ids() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok("[]");
        let client = client(transport.clone());

        let rows = vec![TestResult {
            test_id: Some(71),
            ..TestResult::with_status(ResultStatus::Retest)
        }];
        client.add_results(3, &rows).await.unwrap();

        assert!(transport.urls()[0].ends_with("add_results/3"));
        assert_eq!(
            sent_body(&transport, 0),
            json!({"results": [{"status_id": 4, "test_id": 71}]})
        );
    }
}
