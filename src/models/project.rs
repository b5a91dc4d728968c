use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::payload::compact;

/// How a project organizes its test suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum SuiteMode {
    SingleSuite,
    SingleSuiteWithBaselines,
    MultipleSuites,
}

impl From<u8> for SuiteMode {
    fn from(value: u8) -> Self {
        match value {
            2 => SuiteMode::SingleSuiteWithBaselines,
            3 => SuiteMode::MultipleSuites,
            _ => SuiteMode::SingleSuite,
        }
    }
}

impl From<SuiteMode> for u8 {
    fn from(mode: SuiteMode) -> Self {
        match mode {
            SuiteMode::SingleSuite => 1,
            SuiteMode::SingleSuiteWithBaselines => 2,
            SuiteMode::MultipleSuites => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub announcement: Option<String>,
    pub show_announcement: Option<bool>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<u64>,
    pub suite_mode: Option<SuiteMode>,
    pub url: Option<String>,
}

impl Project {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn to_payload(&self) -> Value {
        compact(json!({
            "name": self.name,
            "announcement": self.announcement,
            "show_announcement": self.show_announcement,
            "suite_mode": self.suite_mode,
            "is_completed": self.is_completed,
        }))
    }
}
