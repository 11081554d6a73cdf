//! # Watchfilter
//!
//! Saved issue filters compiled into parameterized SQL predicates.
//!
//! A watch filter is a named set of `field -> (operator, values)` entries
//! attached to a project. Watchfilter knows which fields a project can be
//! filtered on, checks entries against that registry and compiles them,
//! together with the project's subproject scope, into a single predicate
//! tree. Rendering the tree through a [`query::QueryBuilder`] yields SQL with
//! placeholders and the values to bind; executing it is left to the
//! [`IssueStore`] you provide.
//!
//! ## Crates
//!
//! - [`filters`] (`watchfilter-core`): registry, filter sets, compiler, scope, settings
//! - [`query`] (`watchfilter-query`): predicate AST and PostgreSQL, MySQL and SQLite renderers
//!
//! ## Quick Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use watchfilter::prelude::*;
//!
//! let dir = InMemoryDirectory::new()
//!     .with_caller(Caller::User(7))
//!     .with_project(Project::new(1, "Main"))
//!     .with_user(User::new(7, "Alice"), &[1]);
//! let settings = FilterSettings::default();
//! let ctx = FilterContext::new(&dir, &settings)
//!     .with_today(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
//!
//! let mut filter = WatchFilter::new("Assigned to me", 1, 1);
//! filter
//!     .filters
//!     .insert("assigned_to_id", FilterEntry::new(Operator::Equals, ["me"]));
//!
//! let cond = filter.statement(&ctx).unwrap().unwrap();
//! let (sql, values) = PostgresQueryBuilder::new().build_condition(&cond);
//! assert_eq!(
//!     sql,
//!     r#""issue_statuses"."is_closed" = $1 AND "issues"."assigned_to_id" IN ($2) AND "projects"."id" = $3"#
//! );
//! assert_eq!(values.len(), 3);
//! ```

pub mod filters;
pub mod query;

pub use watchfilter_core::{
	FieldRegistry, FilterContext, FilterError, FilterSet, FilterSettings, IssueStore,
	ProjectScope, Result, StatementBuilder, WatchFilter,
};
pub use watchfilter_query::{Condition, QueryBuilder};

/// Prelude module for convenient imports
pub mod prelude {
	pub use watchfilter_core::prelude::*;

	pub use watchfilter_query::prelude::{
		Cond, Condition, Expr, ExprTrait, MySqlQueryBuilder, PostgresQueryBuilder, QueryBuilder,
		SqliteQueryBuilder, Value, Values,
	};
}
