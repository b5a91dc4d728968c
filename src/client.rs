use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::cache::LazyResource;
use crate::config::ClientConfig;
use crate::engine::Engine;
use crate::engine::uri::{Command, Resource};
use crate::error::ClientError;
use crate::events::EngineEvent;
use crate::http::{ReqwestTransport, Transport};
use crate::models::{Case, Project};
use crate::outcome::Outcome;

/// Typed client for one TestRail instance.
///
/// Holds configuration plus two reference-data caches (projects and priority
/// levels). Both are fetched on first use and kept for the client's lifetime.
pub struct TestRailClient {
    pub(crate) engine: Engine,
    projects: LazyResource<Vec<Project>>,
    priorities: LazyResource<HashMap<u64, i64>>,
}

impl TestRailClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(&ClientConfig::from_env()?)
    }

    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            engine: Engine::new(config, transport),
            projects: LazyResource::new(),
            priorities: LazyResource::new(),
        }
    }

    /// Receives request/response notifications for every call made from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.engine.subscribe()
    }

    /// All projects, fetched once.
    pub async fn projects(&self) -> Result<Outcome<Arc<Vec<Project>>>, ClientError> {
        self.projects.get_or_fetch(|| self.get_projects()).await
    }

    /// Priority id to level, fetched once. Higher level means higher priority.
    pub async fn priority_levels(&self) -> Result<Outcome<Arc<HashMap<u64, i64>>>, ClientError> {
        self.priorities
            .get_or_fetch(|| async {
                let rows = self
                    .engine
                    .get_list::<Value>(&Command::get(Resource::Priorities))
                    .await?;
                Ok::<_, ClientError>(rows.map(|rows| level_map(&rows)))
            })
            .await
    }

    /// Level of the case's priority; `None` when the case has none or the
    /// catalog does not list it.
    pub async fn priority_level_of(&self, case: &Case) -> Result<Outcome<Option<i64>>, ClientError> {
        let Some(priority_id) = case.priority_id else {
            return Ok(Outcome::ok(Some(None)));
        };

        let levels = self.priority_levels().await?;
        if !levels.is_ok() {
            return Ok(levels.cast_failure());
        }
        Ok(levels.map(|levels| levels.get(&priority_id).copied()))
    }

    /// Drops both cached catalogs; the next access fetches them again.
    pub fn refresh_caches(&mut self) {
        self.projects.reset();
        self.priorities.reset();
    }
}

fn level_map(rows: &[Value]) -> HashMap<u64, i64> {
    rows.iter()
        .filter_map(|row| {
            let id = row.get("id").and_then(Value::as_u64)?;
            let level = row.get("priority").and_then(Value::as_i64)?;
            Some((id, level))
        })
        .collect()
}
