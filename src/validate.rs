//! Cross-entity checks run before case-selection mutations.

use serde_json::Value;
use std::collections::HashSet;

use crate::client::TestRailClient;
use crate::engine::uri::{Command, Resource};
use crate::error::ClientError;
use crate::outcome::{MutationResult, Outcome};

impl TestRailClient {
    /// Whether at least one candidate id is a case of the given suite.
    ///
    /// Always reads the live case list; nothing is cached. Paginated replies
    /// are followed page by page until a match is found or `_links.next`
    /// runs out.
    pub async fn has_any_case_in_suite(
        &self,
        project_id: u64,
        suite_id: Option<u64>,
        candidates: &[u64],
    ) -> Result<Outcome<bool>, ClientError> {
        let wanted: HashSet<u64> = candidates.iter().copied().collect();
        let mut offset = 0;

        loop {
            let mut command = Command::get(Resource::Cases).id(project_id);
            if let Some(suite_id) = suite_id {
                command = command.param("suite_id", suite_id);
            }
            if offset > 0 {
                command = command.param("offset", offset);
            }

            let page = self.engine.get::<Value>(&command).await?;
            if !page.is_ok() {
                return Ok(page.cast_failure());
            }
            let page = CasePage::read(page.into_payload().unwrap_or_default());

            if page.ids.iter().any(|id| wanted.contains(id)) {
                return Ok(Outcome::ok(Some(true)));
            }
            if !page.has_next || page.rows == 0 {
                return Ok(Outcome::ok(Some(false)));
            }
            offset += page.rows;
            tracing::debug!(project_id, ?suite_id, offset, "reading next case page");
        }
    }

    /// `Some(rejection)` when the selection must not be sent.
    pub(crate) async fn check_selection(
        &self,
        project_id: u64,
        suite_id: Option<u64>,
        case_ids: &[u64],
    ) -> Result<Option<MutationResult>, ClientError> {
        let check = self
            .has_any_case_in_suite(project_id, suite_id, case_ids)
            .await?;
        if !check.is_ok() {
            return Ok(Some(MutationResult::from_failed(check)));
        }
        if check.into_payload() == Some(true) {
            return Ok(None);
        }

        tracing::warn!(project_id, ?suite_id, ?case_ids, "case selection matches no case in suite");
        Ok(Some(MutationResult::rejected(format!(
            "none of the case ids {case_ids:?} belong to project {project_id}{}",
            suite_id.map(|id| format!(" suite {id}")).unwrap_or_default()
        ))))
    }
}

/// One reply of `get_cases`: a bare array, or a paginated envelope.
struct CasePage {
    ids: Vec<u64>,
    rows: usize,
    has_next: bool,
}

impl CasePage {
    fn read(body: Value) -> Self {
        let (rows, has_next) = match body {
            Value::Array(rows) => (rows, false),
            Value::Object(mut map) => {
                let has_next = map
                    .get("_links")
                    .and_then(|links| links.get("next"))
                    .is_some_and(|next| next.as_str().is_some_and(|n| !n.is_empty()));
                match map.remove("cases") {
                    Some(Value::Array(rows)) => (rows, has_next),
                    _ => (Vec::new(), false),
                }
            }
            _ => (Vec::new(), false),
        };

        Self {
            ids: rows
                .iter()
                .filter_map(|row| row.get("id").and_then(Value::as_u64))
                .collect(),
            rows: rows.len(),
            has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{client, suite_cases};
    use crate::outcome::StatusCode;
    use crate::testing::ScriptedTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn page(ids: &[u64], offset: u64, next: Option<&str>) -> serde_json::Value {
        json!({
            "offset": offset,
            "limit": 2,
            "size": ids.len(),
            "_links": {"next": next, "prev": null},
            "cases": suite_cases(ids),
        })
    }

    #[tokio::test]
    async fn intersection_decides() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(&suite_cases(&[1, 2, 3]));
        transport.reply_json(&suite_cases(&[1, 2, 3]));
        let client = client(transport.clone());

        let hit = client.has_any_case_in_suite(1, Some(5), &[3, 4]).await.unwrap();
        let miss = client.has_any_case_in_suite(1, Some(5), &[5, 6]).await.unwrap();

        assert_eq!(hit.into_payload(), Some(true));
        assert_eq!(miss.into_payload(), Some(false));
        assert_eq!(transport.calls(), 2);
        assert!(transport.urls()[0].ends_with("get_cases/1&suite_id=5"));
    }

    #[tokio::test]
    async fn remote_failure_blocks_selection() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_status(403);
        let client = client(transport);

        let rejection = client.check_selection(1, None, &[1]).await.unwrap().unwrap();
        assert_eq!(rejection.status, StatusCode::Forbidden);
        assert!(!rejection.succeeded);
    }

    #[tokio::test]
    async fn later_pages_are_searched() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(&page(&[1, 2], 0, Some("/api/v2/get_cases/1&suite_id=5&offset=2")));
        transport.reply_json(&page(&[3, 4], 2, Some("/api/v2/get_cases/1&suite_id=5&offset=4")));
        transport.reply_json(&page(&[9], 4, None));
        let client = client(transport.clone());

        let hit = client.has_any_case_in_suite(1, Some(5), &[4]).await.unwrap();

        assert_eq!(hit.into_payload(), Some(true));
        assert_eq!(transport.calls(), 2);
        assert!(transport.urls()[1].ends_with("get_cases/1&suite_id=5&offset=2"));
    }

    #[tokio::test]
    async fn last_page_ends_the_search() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply_json(&page(&[1, 2], 0, Some("/api/v2/get_cases/1&offset=2")));
        transport.reply_json(&page(&[3], 2, None));
        let client = client(transport.clone());

        let miss = client.has_any_case_in_suite(1, None, &[7]).await.unwrap();

        assert_eq!(miss.into_payload(), Some(false));
        assert_eq!(transport.calls(), 2);
        assert!(transport.urls()[1].ends_with("get_cases/1&offset=2"));
    }
}
