//! Per-resource operations.
//!
//! Each operation builds a [`Command`](crate::engine::uri::Command),
//! assembles a payload, merges caller custom fields and hands off to the
//! engine. Reads return [`Outcome`](crate::Outcome), writes return
//! [`MutationResult`](crate::MutationResult).

mod cases;
mod milestones;
mod plans;
mod projects;
mod reference;
mod results;
mod runs;
mod sections;
mod suites;
mod test_instances;
mod users;

use serde_json::Value;

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Sets the selection mode: an explicit case list, or every case.
pub(crate) fn with_selection(payload: Value, case_ids: Option<&[u64]>) -> Value {
    let Value::Object(mut map) = payload else {
        return payload;
    };
    map.insert("include_all".to_string(), Value::Bool(case_ids.is_none()));
    match case_ids {
        Some(ids) => {
            map.insert("case_ids".to_string(), Value::from(ids.to_vec()));
        }
        None => {
            map.remove("case_ids");
        }
    }
    Value::Object(map)
}
