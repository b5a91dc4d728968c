//! Request body assembly.

use serde_json::{Map, Value};

/// Merges caller-supplied custom fields into a base payload.
///
/// Custom values win on key collision. `None`, `null` and non-object inputs
/// add nothing.
pub fn merge_custom(base: Value, custom: Option<&Value>) -> Value {
    let mut base = match base {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => return other,
    };

    match custom {
        Some(Value::Object(extra)) => {
            for (key, value) in extra {
                base.insert(key.clone(), value.clone());
            }
        }
        Some(Value::Null) | None => {}
        Some(other) => {
            tracing::warn!(kind = json_kind(other), "ignoring custom fields that are not an object");
        }
    }

    Value::Object(base)
}

/// Drops `null` members so optional fields stay off the wire.
pub fn compact(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .collect(),
        ),
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn custom_value_wins() {
        let merged = merge_custom(json!({"title": "A"}), Some(&json!({"custom_x": 1, "title": "B"})));
        assert_eq!(merged, json!({"title": "B", "custom_x": 1}));
    }

    #[test]
    fn null_or_missing_custom_is_noop() {
        let base = json!({"title": "A"});
        assert_eq!(merge_custom(base.clone(), None), base);
        assert_eq!(merge_custom(base.clone(), Some(&Value::Null)), base);
        assert_eq!(merge_custom(base.clone(), Some(&json!([1, 2]))), base);
    }

    #[test]
    fn compact_drops_nulls_only() {
        let value = compact(json!({"a": null, "b": 0, "c": false, "d": ""}));
        assert_eq!(value, json!({"b": 0, "c": false, "d": ""}));
    }
}
