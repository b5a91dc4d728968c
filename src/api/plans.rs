use serde_json::Value;

use super::{is_blank, with_selection};
use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource, Verb};
use crate::error::ClientError;
use crate::models::{Plan, PlanEntry};
use crate::outcome::{MutationResult, Outcome};
use crate::payload::merge_custom;

impl TestRailClient {
    pub async fn get_plan(&self, plan_id: u64) -> Result<Outcome<Plan>, ClientError> {
        self.engine.get(&Command::get(Resource::Plan).id(plan_id)).await
    }

    pub async fn get_plans(&self, project_id: u64) -> Result<Outcome<Vec<Plan>>, ClientError> {
        self.engine
            .get_list(&Command::get(Resource::Plans).id(project_id))
            .await
    }

    pub async fn add_plan(
        &self,
        project_id: u64,
        plan: &Plan,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        if is_blank(plan.name.as_deref()) {
            return Ok(MutationResult::rejected("plan name must not be blank"));
        }
        let body = merge_custom(plan.to_payload(), custom);
        self.engine
            .mutate(&Command::new(Verb::Add, Resource::Plan).id(project_id), Some(&body))
            .await
    }

    /// Updates plan-level fields. Entries are managed with the entry calls.
    pub async fn update_plan(
        &self,
        plan_id: u64,
        plan: &Plan,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let mut base = plan.to_payload();
        if let Value::Object(map) = &mut base {
            map.remove("entries");
        }
        let body = merge_custom(base, custom);
        self.engine
            .mutate(&Command::new(Verb::Update, Resource::Plan).id(plan_id), Some(&body))
            .await
    }

    pub async fn close_plan(&self, plan_id: u64) -> Result<MutationResult, ClientError> {
        self.engine
            .mutate(&Command::new(Verb::Close, Resource::Plan).id(plan_id), None)
            .await
    }

    pub async fn delete_plan(&self, plan_id: u64) -> Result<MutationResult, ClientError> {
        self.engine
            .mutate(&Command::new(Verb::Delete, Resource::Plan).id(plan_id), None)
            .await
    }

    /// Adds an entry to a plan. The returned id is the entry's first run.
    ///
    /// A case selection is checked against the plan's project and the
    /// entry's suite before anything is created.
    pub async fn add_plan_entry(
        &self,
        plan_id: u64,
        entry: &PlanEntry,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let Some(suite_id) = entry.suite_id else {
            return Ok(MutationResult::rejected("plan entry needs a suite id"));
        };

        let selection = entry.selection();
        if let Some(case_ids) = selection {
            let plan = self.get_plan(plan_id).await?;
            if !plan.is_ok() {
                return Ok(MutationResult::from_failed(plan));
            }
            let Some(project_id) = plan.into_payload().and_then(|p| p.project_id) else {
                return Ok(MutationResult::rejected(format!(
                    "plan {plan_id} did not report its project"
                )));
            };
            if let Some(rejection) = self
                .check_selection(project_id, Some(suite_id), case_ids)
                .await?
            {
                return Ok(rejection);
            }
        }

        let body = merge_custom(with_selection(entry.to_payload(), selection), custom);
        self.engine
            .mutate(
                &Command::new(Verb::Add, Resource::PlanEntry).id(plan_id),
                Some(&body),
            )
            .await
    }

    pub async fn update_plan_entry(
        &self,
        plan_id: u64,
        entry_id: &str,
        entry: &PlanEntry,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        if entry_id.trim().is_empty() {
            return Ok(MutationResult::rejected("plan entry id must not be blank"));
        }
        let mut base = entry.to_payload();
        if let Value::Object(map) = &mut base {
            map.remove("suite_id");
        }
        let body = merge_custom(base, custom);
        self.engine
            .mutate(
                &Command::new(Verb::Update, Resource::PlanEntry)
                    .id(plan_id)
                    .secondary_key(entry_id.trim()),
                Some(&body),
            )
            .await
    }

    pub async fn delete_plan_entry(
        &self,
        plan_id: u64,
        entry_id: &str,
    ) -> Result<MutationResult, ClientError> {
        if entry_id.trim().is_empty() {
            return Ok(MutationResult::rejected("plan entry id must not be blank"));
        }
        self.engine
            .mutate(
                &Command::new(Verb::Delete, Resource::PlanEntry)
                    .id(plan_id)
                    .secondary_key(entry_id.trim()),
                None,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{client, sent_body, suite_cases};
    use crate::outcome::StatusCode;
    use crate::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn add_plan_entry_returns_first_run_id() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"{"id": 30, "project_id": 2, "name": "Release"}"#);
        transport.reply_json(&suite_cases(&[11, 12]));
        transport.reply_ok(r#"{"id": "3933d74b-4282-4c1f", "suite_id": 5, "runs": [{"id": 77}]}"#);
        let client = client(transport.clone());

        let entry = PlanEntry {
            case_ids: Some(vec![12]),
            ..PlanEntry::for_suite(5)
        };
        let result = client.add_plan_entry(30, &entry, None).await.unwrap();

        assert!(result.succeeded);
        assert_eq!(result.id, 77);
        let urls = transport.urls();
        assert!(urls[1].ends_with("get_cases/2&suite_id=5"));
        assert!(urls[2].ends_with("add_plan_entry/30"));
        assert_eq!(
            sent_body(&transport, 2),
            json!({"suite_id": 5, "include_all": false, "case_ids": [12]})
        );
    }

    #[tokio::test]
    async fn add_plan_entry_without_suite_is_rejected() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = client(transport.clone());

        let result = client
            .add_plan_entry(30, &PlanEntry::default(), None)
            .await
            .unwrap();

        assert_eq!(result.status, StatusCode::BadRequest);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn plan_entry_paths_use_string_key() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"{"id": "abc-123", "runs": [{"id": 4}]}"#);
        transport.reply_ok("");
        let client = client(transport.clone());

        let entry = PlanEntry {
            name: Some("Renamed".into()),
            ..PlanEntry::for_suite(5)
        };
        let updated = client.update_plan_entry(30, "abc-123", &entry, None).await.unwrap();
        let deleted = client.delete_plan_entry(30, "abc-123").await.unwrap();

        assert_eq!(updated.id, 4);
        assert!(deleted.succeeded);
        let urls = transport.urls();
        assert!(urls[0].ends_with("update_plan_entry/30/abc-123"));
        assert!(urls[1].ends_with("delete_plan_entry/30/abc-123"));
        assert_eq!(sent_body(&transport, 0), json!({"name": "Renamed"}));
    }

    #[tokio::test]
    async fn update_plan_drops_entries() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"{"id": 30}"#);
        let client = client(transport.clone());

        let plan = Plan {
            entries: Some(vec![PlanEntry::for_suite(1)]),
            ..Plan::named("Release 2")
        };
        client.update_plan(30, &plan, None).await.unwrap();

        assert_eq!(sent_body(&transport, 0), json!({"name": "Release 2"}));
    }
}
