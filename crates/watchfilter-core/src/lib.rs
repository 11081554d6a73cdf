//! # watchfilter-core
//!
//! Issue filter registry and predicate compiler.
//!
//! A [`FilterSet`] maps field keys to an operator and a list of values. The
//! [`FieldRegistry`] of a project says which keys are filterable and which
//! operators each field type accepts. The [`StatementBuilder`] compiles every
//! entry through the [`PredicateCompiler`] and ANDs the fragments with the
//! [`ProjectScope`] fragment into one [`watchfilter_query::Condition`] that an
//! [`IssueStore`] evaluates.
//!
//! ## Architecture
//!
//! - [`directory`]: collaborator traits (projects, users, catalog, custom fields, tags)
//! - [`registry`]: per-project field registry snapshot
//! - [`date_window`]: relative date operators to inclusive date bounds
//! - [`membership`]: group and role filters to assignee ids
//! - [`compiler`]: one field, operator and value list to a predicate fragment
//! - [`filter_set`]: user criteria, short expressions and form input
//! - [`scope`]: subproject inclusion policy
//! - [`statement`]: composition of fragments and scope
//! - [`watch_filter`]: the saved filter record
//! - [`settings`]: site settings loaded from TOML, JSON or the environment
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use watchfilter_core::prelude::*;
//! use watchfilter_query::{QueryBuilder, SqliteQueryBuilder};
//!
//! let dir = InMemoryDirectory::new()
//!     .with_project(Project::new(1, "Main"))
//!     .with_priority(CatalogEntry::new(3, "Normal"));
//! let settings = FilterSettings::default();
//! let ctx = FilterContext::new(&dir, &settings)
//!     .with_today(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
//!
//! let registry = ctx.build_registry(1).unwrap();
//! let mut filters = FilterSet::new();
//! filters.add_short_filter(&registry, "priority_id", "3").unwrap();
//!
//! let scope = ProjectScope::from_filters(1, &filters, &settings);
//! let cond = ctx.compile(&filters, &scope).unwrap().unwrap();
//! assert_eq!(
//!     SqliteQueryBuilder::new().inline_condition(&cond),
//!     r#""issue_statuses"."is_closed" = FALSE AND "issues"."priority_id" IN ('3') AND "projects"."id" = 1"#
//! );
//! ```

pub mod compiler;
pub mod context;
pub mod date_window;
pub mod directory;
pub mod error;
pub mod field;
pub mod filter_set;
pub mod membership;
pub mod memory;
pub mod registry;
pub mod schema;
pub mod scope;
pub mod settings;
pub mod statement;
pub mod store;
pub mod summary;
pub mod watch_filter;

pub use compiler::{FieldPath, PredicateCompiler};
pub use context::FilterContext;
pub use date_window::{DateWindow, DateWindowResolver};
pub use directory::{
	Caller, CatalogEntry, CustomField, CustomFieldDirectory, CustomFieldFormat, Directory, Group,
	IssueCatalog, Project, ProjectHierarchy, Role, Tag, TagDirectory, TagUsageError, User,
	UserDirectory, Version,
};
pub use error::{FieldError, FieldErrorKind, FilterError, Result};
pub use field::{FieldDefinition, FieldType, FilterOption, Operator};
pub use filter_set::{FilterEntry, FilterParams, FilterSet};
pub use membership::{AssigneeFilter, MembershipExpander, MembershipKind};
pub use memory::InMemoryDirectory;
pub use registry::{FieldRegistry, all_projects_values};
pub use scope::{ProjectScope, SubprojectPolicy};
pub use settings::{FilterSettings, SettingsError};
pub use statement::StatementBuilder;
pub use store::{IssueStore, QueryOptions, StoreExecutionError};
pub use summary::{FieldSummary, RegistrySummary};
pub use watch_filter::WatchFilter;

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::context::FilterContext;
	pub use crate::directory::{
		Caller, CatalogEntry, CustomField, CustomFieldFormat, Group, Project, Role, Tag, User,
		Version,
	};
	pub use crate::error::{FieldError, FieldErrorKind, FilterError, Result};
	pub use crate::field::{FieldDefinition, FieldType, Operator};
	pub use crate::filter_set::{FilterEntry, FilterSet};
	pub use crate::memory::InMemoryDirectory;
	pub use crate::registry::FieldRegistry;
	pub use crate::scope::{ProjectScope, SubprojectPolicy};
	pub use crate::settings::FilterSettings;
	pub use crate::statement::StatementBuilder;
	pub use crate::store::{IssueStore, QueryOptions};
	pub use crate::watch_filter::WatchFilter;
}
