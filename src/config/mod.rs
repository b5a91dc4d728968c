//! # Client configuration
//!
//! Loaded from a JSON file or from `TESTRAIL_*` environment variables.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ClientError;

pub const DEFAULT_API_PREFIX: &str = "index.php?/api/v2/";
const DEFAULT_EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: String,
    /// Password or API key.
    #[serde(skip_serializing)]
    pub password: String,
    pub api_prefix: String,
    pub timeout_ms: Option<u64>,
    pub proxy_url: Option<String>,
    pub verify_ssl: bool,
    pub event_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout_ms: None,
            proxy_url: None,
            verify_ssl: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ClientError::config(format!(
                "Failed to read config file `{}`: {e}",
                path.display()
            ))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            ClientError::config(format!(
                "Failed to parse config file `{}`: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(
            lookup("TESTRAIL_URL").unwrap_or_default(),
            lookup("TESTRAIL_USERNAME").unwrap_or_default(),
            lookup("TESTRAIL_PASSWORD").unwrap_or_default(),
        );

        if let Some(prefix) = lookup("TESTRAIL_API_PREFIX") {
            config.api_prefix = prefix;
        }
        if let Some(raw) = lookup("TESTRAIL_TIMEOUT_MS") {
            let ms = raw.trim().parse().map_err(|e| {
                ClientError::config(format!("TESTRAIL_TIMEOUT_MS `{raw}` is not a number: {e}"))
            })?;
            config.timeout_ms = Some(ms);
        }
        config.proxy_url = lookup("TESTRAIL_PROXY").filter(|p| !p.trim().is_empty());
        if let Some(raw) = lookup("TESTRAIL_VERIFY_SSL") {
            config.verify_ssl = !matches!(raw.trim(), "0" | "false" | "no");
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::config("base URL cannot be empty"));
        }
        if self.username.trim().is_empty() {
            return Err(ClientError::config("username cannot be empty"));
        }
        Ok(())
    }

    /// Root every endpoint path is appended to, e.g.
    /// `https://acme.testrail.io/index.php?/api/v2/`.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        let prefix = self.api_prefix.trim().trim_start_matches('/');
        if prefix.is_empty() || prefix.ends_with('/') {
            format!("{base}/{prefix}")
        } else {
            format!("{base}/{prefix}/")
        }
    }
}
