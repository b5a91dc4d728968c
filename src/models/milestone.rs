use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::payload::compact;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<u64>,
    pub parent_id: Option<u64>,
    pub start_on: Option<u64>,
    pub started_on: Option<u64>,
    pub due_on: Option<u64>,
    pub is_started: Option<bool>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<u64>,
    pub url: Option<String>,
}

impl Milestone {
    pub fn to_payload(&self) -> Value {
        compact(json!({
            "name": self.name,
            "description": self.description,
            "parent_id": self.parent_id,
            "start_on": self.start_on,
            "due_on": self.due_on,
            "is_started": self.is_started,
            "is_completed": self.is_completed,
        }))
    }
}
