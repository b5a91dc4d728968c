//! Read-only catalogs: case types, case fields, priorities, result statuses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseType {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseField {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub system_name: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub type_id: Option<u64>,
    pub display_order: Option<u32>,
    pub configs: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Priority {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub is_default: Option<bool>,
    /// Higher means more important.
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub color_dark: Option<u64>,
    pub color_medium: Option<u64>,
    pub color_bright: Option<u64>,
    pub is_system: Option<bool>,
    pub is_untested: Option<bool>,
    pub is_final: Option<bool>,
}
