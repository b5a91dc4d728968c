use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource};
use crate::error::ClientError;
use crate::models::{CaseField, CaseType, Priority, Status};
use crate::outcome::Outcome;

impl TestRailClient {
    pub async fn get_case_fields(&self) -> Result<Outcome<Vec<CaseField>>, ClientError> {
        self.engine.get_list(&Command::get(Resource::CaseFields)).await
    }

    pub async fn get_case_types(&self) -> Result<Outcome<Vec<CaseType>>, ClientError> {
        self.engine.get_list(&Command::get(Resource::CaseTypes)).await
    }

    /// Live priority catalog. [`TestRailClient::priority_levels`] caches it.
    pub async fn get_priorities(&self) -> Result<Outcome<Vec<Priority>>, ClientError> {
        self.engine.get_list(&Command::get(Resource::Priorities)).await
    }

    pub async fn get_statuses(&self) -> Result<Outcome<Vec<Status>>, ClientError> {
        self.engine.get_list(&Command::get(Resource::Statuses)).await
    }
}
