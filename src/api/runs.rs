use serde_json::Value;

use super::{is_blank, with_selection};
use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource, Verb};
use crate::error::ClientError;
use crate::models::Run;
use crate::outcome::{MutationResult, Outcome};
use crate::payload::merge_custom;

impl TestRailClient {
    pub async fn get_run(&self, run_id: u64) -> Result<Outcome<Run>, ClientError> {
        self.engine.get(&Command::get(Resource::Run).id(run_id)).await
    }

    pub async fn get_runs(&self, project_id: u64) -> Result<Outcome<Vec<Run>>, ClientError> {
        self.engine
            .get_list(&Command::get(Resource::Runs).id(project_id))
            .await
    }

    /// Creates a run in `project_id`.
    ///
    /// With `run.case_ids` set, the run only includes those cases, and at
    /// least one of them must belong to `run.suite_id`; otherwise nothing is
    /// sent and a Bad Request result comes back. Without it the run includes
    /// every case of the suite.
    pub async fn add_run(
        &self,
        project_id: u64,
        run: &Run,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        if is_blank(run.name.as_deref()) {
            return Ok(MutationResult::rejected("run name must not be blank"));
        }

        let selection = run.selection();
        if let Some(case_ids) = selection {
            if let Some(rejection) = self
                .check_selection(project_id, run.suite_id, case_ids)
                .await?
            {
                return Ok(rejection);
            }
        }

        let body = merge_custom(with_selection(run.to_payload(), selection), custom);
        self.engine
            .mutate(&Command::new(Verb::Add, Resource::Run).id(project_id), Some(&body))
            .await
    }

    /// Updates a run. A case selection is checked against the project and
    /// suite of the existing run, which is fetched first.
    pub async fn update_run(
        &self,
        run_id: u64,
        run: &Run,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let selection = run.selection();
        if let Some(case_ids) = selection {
            let existing = self.get_run(run_id).await?;
            if !existing.is_ok() {
                return Ok(MutationResult::from_failed(existing));
            }
            let existing = existing.into_payload().unwrap_or_default();
            let Some(project_id) = existing.project_id else {
                return Ok(MutationResult::rejected(format!(
                    "run {run_id} did not report its project"
                )));
            };
            let suite_id = existing.suite_id.or(run.suite_id);
            if let Some(rejection) = self.check_selection(project_id, suite_id, case_ids).await? {
                return Ok(rejection);
            }
        }

        let body = merge_custom(with_selection(run.to_payload(), selection), custom);
        self.engine
            .mutate(&Command::new(Verb::Update, Resource::Run).id(run_id), Some(&body))
            .await
    }

    pub async fn close_run(&self, run_id: u64) -> Result<MutationResult, ClientError> {
        self.engine
            .mutate(&Command::new(Verb::Close, Resource::Run).id(run_id), None)
            .await
    }

    pub async fn delete_run(&self, run_id: u64) -> Result<MutationResult, ClientError> {
        self.engine
            .mutate(&Command::new(Verb::Delete, Resource::Run).id(run_id), None)
            .await
    }
}
