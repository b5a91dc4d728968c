use super::is_blank;
use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource};
use crate::error::ClientError;
use crate::models::User;
use crate::outcome::Outcome;

impl TestRailClient {
    pub async fn get_user(&self, user_id: u64) -> Result<Outcome<User>, ClientError> {
        self.engine.get(&Command::get(Resource::User).id(user_id)).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Outcome<User>, ClientError> {
        if is_blank(Some(email)) {
            return Ok(Outcome::rejected("email must not be blank"));
        }
        let command = Command::get(Resource::UserByEmail).param("email", email.trim());
        self.engine.get(&command).await
    }

    pub async fn get_users(&self) -> Result<Outcome<Vec<User>>, ClientError> {
        self.engine.get_list(&Command::get(Resource::Users)).await
    }
}
