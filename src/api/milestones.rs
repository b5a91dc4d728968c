use serde_json::Value;

use super::is_blank;
use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource, Verb};
use crate::error::ClientError;
use crate::models::Milestone;
use crate::outcome::{MutationResult, Outcome};
use crate::payload::merge_custom;

impl TestRailClient {
    pub async fn get_milestone(&self, milestone_id: u64) -> Result<Outcome<Milestone>, ClientError> {
        self.engine
            .get(&Command::get(Resource::Milestone).id(milestone_id))
            .await
    }

    pub async fn get_milestones(
        &self,
        project_id: u64,
    ) -> Result<Outcome<Vec<Milestone>>, ClientError> {
        self.engine
            .get_list(&Command::get(Resource::Milestones).id(project_id))
            .await
    }

    pub async fn add_milestone(
        &self,
        project_id: u64,
        milestone: &Milestone,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        if is_blank(milestone.name.as_deref()) {
            return Ok(MutationResult::rejected("milestone name must not be blank"));
        }
        let body = merge_custom(milestone.to_payload(), custom);
        self.engine
            .mutate(
                &Command::new(Verb::Add, Resource::Milestone).id(project_id),
                Some(&body),
            )
            .await
    }

    pub async fn update_milestone(
        &self,
        milestone_id: u64,
        milestone: &Milestone,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let body = merge_custom(milestone.to_payload(), custom);
        self.engine
            .mutate(
                &Command::new(Verb::Update, Resource::Milestone).id(milestone_id),
                Some(&body),
            )
            .await
    }

    pub async fn delete_milestone(&self, milestone_id: u64) -> Result<MutationResult, ClientError> {
        self.engine
            .mutate(
                &Command::new(Verb::Delete, Resource::Milestone).id(milestone_id),
                None,
            )
            .await
    }
}
