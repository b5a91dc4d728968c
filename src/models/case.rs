use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::with_custom_fields;
use crate::payload::compact;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Case {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub section_id: Option<u64>,
    pub suite_id: Option<u64>,
    pub template_id: Option<u64>,
    pub type_id: Option<u64>,
    pub priority_id: Option<u64>,
    pub milestone_id: Option<u64>,
    pub refs: Option<String>,
    pub estimate: Option<String>,
    pub estimate_forecast: Option<String>,
    pub created_by: Option<u64>,
    pub created_on: Option<u64>,
    pub updated_by: Option<u64>,
    pub updated_on: Option<u64>,
    /// Everything else the server sent, `custom_*` fields included.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Case {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn to_payload(&self) -> Value {
        let base = compact(json!({
            "title": self.title,
            "template_id": self.template_id,
            "type_id": self.type_id,
            "priority_id": self.priority_id,
            "estimate": self.estimate,
            "milestone_id": self.milestone_id,
            "refs": self.refs,
        }));
        with_custom_fields(base, &self.extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_custom_fields_through_a_round_trip() {
        let case: Case = serde_json::from_str(
            r#"{"id":5,"title":"Login","priority_id":2,"custom_steps":"open page","display_order":3}"#,
        )
        .unwrap();
        assert_eq!(case.extra.get("display_order"), Some(&json!(3)));

        let payload = case.to_payload();
        assert_eq!(
            payload,
            json!({"title":"Login","priority_id":2,"custom_steps":"open page"})
        );
    }
}
