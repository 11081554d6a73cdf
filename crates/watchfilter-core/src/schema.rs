//! Table and column names of the issue store.
//!
//! Compiled predicates reference `issues`, `issue_statuses` and `projects`
//! directly; the store joins the last two when it runs a statement.

pub const ISSUES: &str = "issues";
pub const ISSUE_STATUSES: &str = "issue_statuses";
pub const PROJECTS: &str = "projects";
pub const CUSTOM_VALUES: &str = "custom_values";
pub const WATCHERS: &str = "watchers";
pub const TAGGINGS: &str = "taggings";
pub const TAGS: &str = "tags";

/// Polymorphic type name of issue rows in side tables
pub const ISSUE_TYPE: &str = "Issue";
