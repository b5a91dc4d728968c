use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::payload::compact;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Run {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub suite_id: Option<u64>,
    pub project_id: Option<u64>,
    pub plan_id: Option<u64>,
    pub milestone_id: Option<u64>,
    pub assignedto_id: Option<u64>,
    pub include_all: Option<bool>,
    /// Explicit case selection. Only sent when creating or updating a run.
    pub case_ids: Option<Vec<u64>>,
    pub config: Option<String>,
    pub config_ids: Option<Vec<u64>>,
    pub refs: Option<String>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<u64>,
    pub created_on: Option<u64>,
    pub created_by: Option<u64>,
    pub passed_count: Option<u64>,
    pub blocked_count: Option<u64>,
    pub untested_count: Option<u64>,
    pub retest_count: Option<u64>,
    pub failed_count: Option<u64>,
    pub url: Option<String>,
}

impl Run {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Candidate case selection, if one was given.
    pub fn selection(&self) -> Option<&[u64]> {
        self.case_ids.as_deref().filter(|ids| !ids.is_empty())
    }

    /// Writable fields, without the selection mode.
    pub fn to_payload(&self) -> Value {
        compact(json!({
            "suite_id": self.suite_id,
            "name": self.name,
            "description": self.description,
            "milestone_id": self.milestone_id,
            "assignedto_id": self.assignedto_id,
            "refs": self.refs,
        }))
    }
}
