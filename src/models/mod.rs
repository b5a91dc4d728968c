//! Resource records exchanged with the API.
//!
//! Reads decode the full record. Writes go through each record's
//! `to_payload`, which only emits writable fields that are set.

mod case;
mod milestone;
mod plan;
mod project;
mod reference;
mod result;
mod run;
mod section;
mod suite;
mod user;

pub use case::Case;
pub use milestone::Milestone;
pub use plan::{Plan, PlanEntry};
pub use project::{Project, SuiteMode};
pub use reference::{CaseField, CaseType, Priority, Status};
pub use result::{ResultStatus, TestResult};
pub use run::Run;
pub use section::Section;
pub use suite::Suite;
pub use test::Test;
pub use user::User;

use serde_json::{Map, Value};

/// Keys of a flattened extras map that are custom fields.
pub(crate) fn custom_fields(extra: &Map<String, Value>) -> impl Iterator<Item = (&String, &Value)> {
    extra.iter().filter(|(key, _)| key.starts_with("custom_"))
}

/// Adds the custom fields of `extra` to an object payload.
pub(crate) fn with_custom_fields(payload: Value, extra: &Map<String, Value>) -> Value {
    match payload {
        Value::Object(mut map) => {
            for (key, value) in custom_fields(extra) {
                if !value.is_null() {
                    map.insert(key.clone(), value.clone());
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}
