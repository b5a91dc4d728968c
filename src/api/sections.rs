use serde_json::Value;

use super::is_blank;
use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource, Verb};
use crate::error::ClientError;
use crate::models::Section;
use crate::outcome::{MutationResult, Outcome};
use crate::payload::merge_custom;

impl TestRailClient {
    pub async fn get_section(&self, section_id: u64) -> Result<Outcome<Section>, ClientError> {
        self.engine
            .get(&Command::get(Resource::Section).id(section_id))
            .await
    }

    pub async fn get_sections(
        &self,
        project_id: u64,
        suite_id: Option<u64>,
    ) -> Result<Outcome<Vec<Section>>, ClientError> {
        let mut command = Command::get(Resource::Sections).id(project_id);
        if let Some(suite_id) = suite_id {
            command = command.param("suite_id", suite_id);
        }
        self.engine.get_list(&command).await
    }

    pub async fn add_section(
        &self,
        project_id: u64,
        section: &Section,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        if is_blank(section.name.as_deref()) {
            return Ok(MutationResult::rejected("section name must not be blank"));
        }
        let body = merge_custom(section.to_payload(), custom);
        self.engine
            .mutate(&Command::new(Verb::Add, Resource::Section).id(project_id), Some(&body))
            .await
    }

    pub async fn update_section(
        &self,
        section_id: u64,
        section: &Section,
        custom: Option<&Value>,
    ) -> Result<MutationResult, ClientError> {
        let body = merge_custom(section.to_payload(), custom);
        self.engine
            .mutate(
                &Command::new(Verb::Update, Resource::Section).id(section_id),
                Some(&body),
            )
            .await
    }

    pub async fn delete_section(&self, section_id: u64) -> Result<MutationResult, ClientError> {
        self.engine
            .mutate(&Command::new(Verb::Delete, Resource::Section).id(section_id), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::client;
    use crate::testing::ScriptedTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn sections_filter_by_suite() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_ok(r#"{"offset":0,"sections":[{"id":1,"name":"Auth","depth":0}]}"#);
        let client = client(transport.clone());

        let sections = client.get_sections(2, Some(8)).await.unwrap();

        assert_eq!(sections.into_payload().unwrap()[0].name.as_deref(), Some("Auth"));
        assert!(transport.urls()[0].ends_with("get_sections/2&suite_id=8"));
    }
}
