use serde_json::Value;

use super::is_blank;
use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource, Verb};
use crate::error::ClientError;
use crate::models::Suite;
use crate::outcome::{MutationResult, Outcome};
use crate::payload::merge_custom;

impl TestRailClient {
    pub async fn get_suite(&self, suite_id: u64) -> Result<Outcome<Suite>, ClientError> {
        self.engine
            .get(&Command::get(Resource::Suite).id(suite_id))
            .await
    }

    pub async fn get_suites(&self, project_id: u64) -> Result<Outcome<Vec<Suite>>, ClientError> {
        self.engine
            .get_list(&Command::get(Resource::Suites).id(project_id))
            .await
    }

    pub async fn add_suite(
        &self,
        project_id: u64,
        suite: &Suite,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        if is_blank(suite.name.as_deref()) {
            return Ok(MutationResult::rejected("suite name must not be blank"));
        }
        let body = merge_custom(suite.to_payload(), custom);
        self.engine
            .mutate(&Command::new(Verb::Add, Resource::Suite).id(project_id), Some(&body))
            .await
    }

    pub async fn update_suite(
        &self,
        suite_id: u64,
        suite: &Suite,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let body = merge_custom(suite.to_payload(), custom);
        self.engine
            .mutate(&Command::new(Verb::Update, Resource::Suite).id(suite_id), Some(&body))
            .await
    }

    pub async fn delete_suite(&self, suite_id: u64) -> Result<MutationResult, ClientError> {
        self.engine
            .mutate(&Command::new(Verb::Delete, Resource::Suite).id(suite_id), None)
            .await
    }
}
