use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::payload::compact;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub suite_id: Option<u64>,
    pub parent_id: Option<u64>,
    pub depth: Option<u32>,
    pub display_order: Option<u32>,
}

impl Section {
    pub fn to_payload(&self) -> Value {
        compact(json!({
            "name": self.name,
            "description": self.description,
            "suite_id": self.suite_id,
            "parent_id": self.parent_id,
        }))
    }
}
