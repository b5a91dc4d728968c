use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::payload::compact;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suite {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<u64>,
    pub is_master: Option<bool>,
    pub is_baseline: Option<bool>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<u64>,
    pub url: Option<String>,
}

impl Suite {
    pub fn to_payload(&self) -> Value {
        compact(json!({
            "name": self.name,
            "description": self.description,
        }))
    }
}
