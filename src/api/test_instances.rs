use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource};
use crate::error::ClientError;
use crate::models::Test;
use crate::outcome::Outcome;

impl TestRailClient {
    pub async fn get_test(&self, test_id: u64) -> Result<Outcome<Test>, ClientError> {
        self.engine.get(&Command::get(Resource::Test).id(test_id)).await
    }

    pub async fn get_tests(&self, run_id: u64) -> Result<Outcome<Vec<Test>>, ClientError> {
        self.engine
            .get_list(&Command::get(Resource::Tests).id(run_id))
            .await
    }
}
