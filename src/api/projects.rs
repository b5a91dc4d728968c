use serde_json::Value;

use super::is_blank;
use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource, Verb};
use crate::error::ClientError;
use crate::models::Project;
use crate::outcome::{MutationResult, Outcome};
use crate::payload::merge_custom;

impl TestRailClient {
    pub async fn get_project(&self, project_id: u64) -> Result<Outcome<Project>, ClientError> {
        self.engine
            .get(&Command::get(Resource::Project).id(project_id))
            .await
    }

    /// Live project list. See [`TestRailClient::projects`] for the cached one.
    pub async fn get_projects(&self) -> Result<Outcome<Vec<Project>>, ClientError> {
        self.engine.get_list(&Command::get(Resource::Projects)).await
    }

    pub async fn add_project(
        &self,
        project: &Project,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        if is_blank(project.name.as_deref()) {
            return Ok(MutationResult::rejected("project name must not be blank"));
        }
        let body = merge_custom(project.to_payload(), custom);
        self.engine
            .mutate(&Command::new(Verb::Add, Resource::Project), Some(&body))
            .await
    }

    pub async fn update_project(
        &self,
        project_id: u64,
        project: &Project,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let body = merge_custom(project.to_payload(), custom);
        self.engine
            .mutate(
                &Command::new(Verb::Update, Resource::Project).id(project_id),
                Some(&body),
            )
            .await
    }

    pub async fn delete_project(&self, project_id: u64) -> Result<MutationResult, ClientError> {
        self.engine
            .mutate(&Command::new(Verb::Delete, Resource::Project).id(project_id), None)
            .await
    }
}
