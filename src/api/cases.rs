use serde_json::Value;

use super::is_blank;
use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource, Verb};
use crate::error::ClientError;
use crate::models::Case;
use crate::outcome::{MutationResult, Outcome};
use crate::payload::merge_custom;

impl TestRailClient {
    pub async fn get_case(&self, case_id: u64) -> Result<Outcome<Case>, ClientError> {
        self.engine.get(&Command::get(Resource::Case).id(case_id)).await
    }

    pub async fn get_cases(
        &self,
        project_id: u64,
        suite_id: Option<u64>,
        section_id: Option<u64>,
    ) -> Result<Outcome<Vec<Case>>, ClientError> {
        let mut command = Command::get(Resource::Cases).id(project_id);
        if let Some(suite_id) = suite_id {
            command = command.param("suite_id", suite_id);
        }
        if let Some(section_id) = section_id {
            command = command.param("section_id", section_id);
        }
        self.engine.get_list(&command).await
    }

    pub async fn add_case(
        &self,
        section_id: u64,
        case: &Case,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        if is_blank(case.title.as_deref()) {
            return Ok(MutationResult::rejected("case title must not be blank"));
        }
        let body = merge_custom(case.to_payload(), custom);
        self.engine
            .mutate(&Command::new(Verb::Add, Resource::Case).id(section_id), Some(&body))
            .await
    }

    pub async fn update_case(
        &self,
        case_id: u64,
        case: &Case,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let body = merge_custom(case.to_payload(), custom);
        self.engine
            .mutate(&Command::new(Verb::Update, Resource::Case).id(case_id), Some(&body))
            .await
    }

    pub async fn delete_case(&self, case_id: u64) -> Result<MutationResult, ClientError> {
        self.engine
            .mutate(&Command::new(Verb::Delete, Resource::Case).id(case_id), None)
            .await
    }
}
