//! Command descriptors and endpoint paths.

use std::fmt::{self, Display};
use url::form_urlencoded::byte_serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Add,
    Update,
    Close,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Add => "add",
            Verb::Update => "update",
            Verb::Close => "close",
            Verb::Delete => "delete",
        }
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Project,
    Projects,
    Suite,
    Suites,
    Section,
    Sections,
    Case,
    Cases,
    CaseFields,
    CaseTypes,
    Priorities,
    Statuses,
    Milestone,
    Milestones,
    Run,
    Runs,
    Plan,
    Plans,
    PlanEntry,
    Test,
    Tests,
    Result,
    ResultForCase,
    Results,
    ResultsForCase,
    ResultsForRun,
    ResultsForCases,
    User,
    UserByEmail,
    Users,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Project => "project",
            Resource::Projects => "projects",
            Resource::Suite => "suite",
            Resource::Suites => "suites",
            Resource::Section => "section",
            Resource::Sections => "sections",
            Resource::Case => "case",
            Resource::Cases => "cases",
            Resource::CaseFields => "case_fields",
            Resource::CaseTypes => "case_types",
            Resource::Priorities => "priorities",
            Resource::Statuses => "statuses",
            Resource::Milestone => "milestone",
            Resource::Milestones => "milestones",
            Resource::Run => "run",
            Resource::Runs => "runs",
            Resource::Plan => "plan",
            Resource::Plans => "plans",
            Resource::PlanEntry => "plan_entry",
            Resource::Test => "test",
            Resource::Tests => "tests",
            Resource::Result => "result",
            Resource::ResultForCase => "result_for_case",
            Resource::Results => "results",
            Resource::ResultsForCase => "results_for_case",
            Resource::ResultsForRun => "results_for_run",
            Resource::ResultsForCases => "results_for_cases",
            Resource::User => "user",
            Resource::UserByEmail => "user_by_email",
            Resource::Users => "users",
        }
    }

    /// Key under which paginated list replies nest their items.
    pub fn list_key(self) -> Option<&'static str> {
        match self {
            Resource::Projects => Some("projects"),
            Resource::Suites => Some("suites"),
            Resource::Sections => Some("sections"),
            Resource::Cases => Some("cases"),
            Resource::Milestones => Some("milestones"),
            Resource::Runs => Some("runs"),
            Resource::Plans => Some("plans"),
            Resource::Tests => Some("tests"),
            Resource::Results | Resource::ResultsForCase | Resource::ResultsForRun => {
                Some("results")
            }
            Resource::Users => Some("users"),
            _ => None,
        }
    }
}

/// What to call, built once per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub resource: Resource,
    pub id: Option<u64>,
    pub secondary_id: Option<u64>,
    pub secondary_key: Option<String>,
    pub query: Option<String>,
}

impl Command {
    pub fn new(verb: Verb, resource: Resource) -> Self {
        Self {
            verb,
            resource,
            id: None,
            secondary_id: None,
            secondary_key: None,
            query: None,
        }
    }

    pub fn get(resource: Resource) -> Self {
        Self::new(Verb::Get, resource)
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn secondary_id(mut self, id: u64) -> Self {
        self.secondary_id = Some(id);
        self
    }

    pub fn secondary_key(mut self, key: impl Into<String>) -> Self {
        self.secondary_key = Some(key.into());
        self
    }

    /// Appends a `key=value` pair to the query fragment. The value is
    /// form-urlencoded.
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        let value = value.to_string();
        let encoded: String = byte_serialize(value.as_bytes()).collect();
        let pair = format!("{key}={encoded}");
        self.query = Some(match self.query.take() {
            Some(existing) => format!("{existing}&{pair}"),
            None => pair,
        });
        self
    }

    /// Endpoint path without the query fragment.
    pub fn route(&self) -> String {
        build_path(
            self.verb,
            self.resource,
            self.id,
            self.secondary_id,
            None,
            self.secondary_key.as_deref(),
        )
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    pub fn path(&self) -> String {
        build_path(
            self.verb,
            self.resource,
            self.id,
            self.secondary_id,
            self.query.as_deref(),
            self.secondary_key.as_deref(),
        )
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Builds the relative endpoint path `<verb>_<resource>[/id][/id2][?query]`.
///
/// A numeric secondary id wins over a string one when both are given.
pub fn build_path(
    verb: Verb,
    resource: Resource,
    id: Option<u64>,
    secondary_id: Option<u64>,
    query: Option<&str>,
    secondary_key: Option<&str>,
) -> String {
    let mut path = format!("{}_{}", verb.as_str(), resource.as_str());

    if let Some(id) = id {
        path.push('/');
        path.push_str(&id.to_string());
    }

    match (secondary_id, secondary_key) {
        (Some(id2), _) => {
            path.push('/');
            path.push_str(&id2.to_string());
        }
        (None, Some(key)) => {
            path.push('/');
            path.push_str(key);
        }
        (None, None) => {}
    }

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        path.push('?');
        path.push_str(query);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_verb_resource_prefix() {
        assert_eq!(
            build_path(Verb::Add, Resource::Case, Some(7), None, None, None),
            "add_case/7"
        );
        assert_eq!(
            build_path(Verb::Get, Resource::Projects, None, None, None, None),
            "get_projects"
        );
    }

    #[test]
    fn is_deterministic() {
        let a = build_path(Verb::Get, Resource::Cases, Some(1), None, Some("suite_id=2"), None);
        let b = build_path(Verb::Get, Resource::Cases, Some(1), None, Some("suite_id=2"), None);
        assert_eq!(a, b);
    }

    #[test]
    fn changing_primary_id_changes_only_its_segment() {
        let a = build_path(Verb::Get, Resource::ResultsForCase, Some(3), Some(9), Some("limit=5"), None);
        let b = build_path(Verb::Get, Resource::ResultsForCase, Some(4), Some(9), Some("limit=5"), None);
        assert_eq!(a, "get_results_for_case/3/9?limit=5");
        assert_eq!(b, "get_results_for_case/4/9?limit=5");
    }

    #[test]
    fn numeric_secondary_id_takes_precedence() {
        let path = build_path(Verb::Update, Resource::PlanEntry, Some(5), Some(8), None, Some("abc-def"));
        assert_eq!(path, "update_plan_entry/5/8");

        let path = build_path(Verb::Update, Resource::PlanEntry, Some(5), None, None, Some("abc-def"));
        assert_eq!(path, "update_plan_entry/5/abc-def");
    }

    #[test]
    fn empty_query_is_dropped() {
        assert_eq!(
            build_path(Verb::Get, Resource::Runs, Some(1), None, Some(""), None),
            "get_runs/1"
        );
    }

    #[test]
    fn command_params_join_with_ampersand() {
        let cmd = Command::get(Resource::Cases)
            .id(1)
            .param("suite_id", 2)
            .param("section_id", 3);
        assert_eq!(cmd.path(), "get_cases/1?suite_id=2&section_id=3");
        assert_eq!(cmd.route(), "get_cases/1");
        assert_eq!(cmd.query(), Some("suite_id=2&section_id=3"));
    }

    #[test]
    fn param_values_are_form_encoded() {
        let cmd = Command::get(Resource::UserByEmail).param("email", "a b&c=d?ü@x.io");
        assert_eq!(cmd.query(), Some("email=a+b%26c%3Dd%3F%C3%BC%40x.io"));
    }

    #[test]
    fn list_keys_follow_resource_names() {
        assert_eq!(Resource::Cases.list_key(), Some("cases"));
        assert_eq!(Resource::ResultsForRun.list_key(), Some("results"));
        assert_eq!(Resource::Priorities.list_key(), None);
    }
}
