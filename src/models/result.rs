use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::with_custom_fields;
use crate::payload::compact;

/// Built-in result statuses; ids above 5 are instance-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Passed,
    Blocked,
    Untested,
    Retest,
    Failed,
    Custom(u64),
}

impl From<u64> for ResultStatus {
    fn from(id: u64) -> Self {
        match id {
            1 => ResultStatus::Passed,
            2 => ResultStatus::Blocked,
            3 => ResultStatus::Untested,
            4 => ResultStatus::Retest,
            5 => ResultStatus::Failed,
            other => ResultStatus::Custom(other),
        }
    }
}

impl From<ResultStatus> for u64 {
    fn from(status: ResultStatus) -> Self {
        match status {
            ResultStatus::Passed => 1,
            ResultStatus::Blocked => 2,
            ResultStatus::Untested => 3,
            ResultStatus::Retest => 4,
            ResultStatus::Failed => 5,
            ResultStatus::Custom(id) => id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResult {
    pub id: Option<u64>,
    pub test_id: Option<u64>,
    /// Only used when reporting results by case id.
    pub case_id: Option<u64>,
    pub status_id: Option<u64>,
    pub comment: Option<String>,
    pub version: Option<String>,
    pub elapsed: Option<String>,
    pub defects: Option<String>,
    pub assignedto_id: Option<u64>,
    pub created_by: Option<u64>,
    pub created_on: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestResult {
    pub fn with_status(status: ResultStatus) -> Self {
        Self {
            status_id: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn status(&self) -> Option<ResultStatus> {
        self.status_id.map(ResultStatus::from)
    }

    pub fn to_payload(&self) -> Value {
        let base = compact(json!({
            "case_id": self.case_id,
            "status_id": self.status_id,
            "comment": self.comment,
            "version": self.version,
            "elapsed": self.elapsed,
            "defects": self.defects,
            "assignedto_id": self.assignedto_id,
        }));
        with_custom_fields(base, &self.extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ids_map_both_ways() {
        assert_eq!(ResultStatus::from(5), ResultStatus::Failed);
        assert_eq!(ResultStatus::from(8), ResultStatus::Custom(8));
        assert_eq!(u64::from(ResultStatus::Retest), 4);
    }

    #[test]
    fn payload_carries_status_and_comment() {
        let result = TestResult {
            comment: Some("flaky on CI".into()),
            ..TestResult::with_status(ResultStatus::Passed)
        };
        assert_eq!(
            result.to_payload(),
            json!({"status_id": 1, "comment": "flaky on CI"})
        );
        assert_eq!(result.status(), Some(ResultStatus::Passed));
    }
}
