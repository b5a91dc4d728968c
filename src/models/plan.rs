use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::run::Run;
use crate::payload::compact;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<u64>,
    pub milestone_id: Option<u64>,
    pub assignedto_id: Option<u64>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<u64>,
    pub created_on: Option<u64>,
    pub created_by: Option<u64>,
    pub entries: Option<Vec<PlanEntry>>,
    pub url: Option<String>,
}

impl Plan {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn to_payload(&self) -> Value {
        let entries = self
            .entries
            .as_ref()
            .map(|entries| entries.iter().map(PlanEntry::to_payload).collect::<Vec<_>>());
        compact(json!({
            "name": self.name,
            "description": self.description,
            "milestone_id": self.milestone_id,
            "assignedto_id": self.assignedto_id,
            "entries": entries,
        }))
    }
}

/// A group of runs inside a plan. Its id is a GUID string, not a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanEntry {
    pub id: Option<String>,
    pub suite_id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub assignedto_id: Option<u64>,
    pub include_all: Option<bool>,
    pub case_ids: Option<Vec<u64>>,
    pub config_ids: Option<Vec<u64>>,
    pub refs: Option<String>,
    pub runs: Option<Vec<Run>>,
}

impl PlanEntry {
    pub fn for_suite(suite_id: u64) -> Self {
        Self {
            suite_id: Some(suite_id),
            ..Self::default()
        }
    }

    pub fn selection(&self) -> Option<&[u64]> {
        self.case_ids.as_deref().filter(|ids| !ids.is_empty())
    }

    pub fn to_payload(&self) -> Value {
        compact(json!({
            "suite_id": self.suite_id,
            "name": self.name,
            "description": self.description,
            "assignedto_id": self.assignedto_id,
            "include_all": self.include_all,
            "case_ids": self.case_ids,
            "config_ids": self.config_ids,
            "refs": self.refs,
        }))
    }
}
