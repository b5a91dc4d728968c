use serde_json::Value;

/// Pulls the created or updated entity id out of a mutation reply.
///
/// A string `id` marks a plan entry, whose first run carries the numeric id.
/// Anything unexpected yields 0.
pub fn extract_id(body: &str) -> u64 {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return 0;
    };

    match value.get("id") {
        Some(Value::Number(id)) => id.as_u64().unwrap_or(0),
        Some(Value::String(_)) => value
            .get("runs")
            .and_then(|runs| runs.get(0))
            .and_then(|run| run.get("id"))
            .and_then(Value::as_u64)
            .unwrap_or(0),
        _ => 0,
    }
}
