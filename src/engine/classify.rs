//! Turning raw transport outcomes into typed envelopes.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Fault, TransportFault};
use crate::outcome::{Outcome, StatusCode};

/// What a single invocation produced, before interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOutcome {
    pub uri: String,
    pub result: Result<String, TransportFault>,
}

impl RawOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Scans a fault description for an embedded status code.
///
/// Codes are tried in [`StatusCode::FAULT_ORDER`]; the first one found wins,
/// regardless of where it appears in the text.
pub fn sniff_status(description: &str) -> Option<StatusCode> {
    StatusCode::FAULT_ORDER
        .into_iter()
        .find(|status| description.contains(&status.code().to_string()))
}

/// Structured status when the transport supplied one, text sniffing otherwise.
pub fn status_of(fault: &TransportFault) -> Option<StatusCode> {
    match fault.status {
        Some(code) => StatusCode::from_fault_code(code),
        None => sniff_status(&fault.message),
    }
}

/// Maps a fault onto a known status, or hands it back unclassified.
pub fn classify_fault(fault: TransportFault) -> Result<(StatusCode, Fault), ClientError> {
    match status_of(&fault) {
        Some(status) => Ok((status, Fault::Remote(fault))),
        None => Err(ClientError::Unclassified(fault)),
    }
}

pub fn classify<T, F>(raw: RawOutcome, parse: F) -> Result<Outcome<T>, ClientError>
where
    F: FnOnce(&str) -> Result<T, serde_json::Error>,
{
    let RawOutcome { uri, result } = raw;
    match result {
        Ok(body) => parse(&body)
            .map(|payload| Outcome::ok(Some(payload)))
            .map_err(|source| ClientError::Decode { uri, source }),
        Err(fault) => {
            let (status, fault) = classify_fault(fault)?;
            Ok(Outcome::failed(status, fault))
        }
    }
}

/// Parses a single object; a blank body yields the default value.
pub fn parse_object<T>(body: &str) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(body)
}

/// Parses a list of objects.
///
/// Accepts a bare array, a paginated envelope holding the array under
/// `list_key`, or a lone object which becomes a one-element list.
pub fn parse_list<T>(body: &str, list_key: Option<&str>) -> Result<Vec<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => items.into_iter().map(serde_json::from_value).collect(),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = list_key.and_then(|key| map.remove(key)) {
                return items.into_iter().map(serde_json::from_value).collect();
            }
            Ok(vec![serde_json::from_value(Value::Object(map))?])
        }
        Value::Null => Ok(Vec::new()),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}
