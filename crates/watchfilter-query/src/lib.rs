//! # watchfilter-query
//!
//! Predicate AST and SQL renderers for watchfilter.
//!
//! Filter compilation never concatenates SQL text. It builds a tree of
//! [`SimpleExpr`] and [`Condition`] values; a backend implementing
//! [`QueryBuilder`] walks the tree and returns SQL with placeholders plus the
//! bound [`Values`].
//!
//! ## Architecture
//!
//! - [`value`]: bound parameter values
//! - [`types`]: column references and operators
//! - [`expr`]: expression builder ([`Expr`], [`ExprTrait`]) and condition chains
//! - [`query`]: sub-select statements used by correlated predicates
//! - [`backend`]: PostgreSQL, MySQL and SQLite renderers
//!
//! ## Quick Start
//!
//! ```rust
//! use watchfilter_query::prelude::*;
//!
//! let cond = Cond::all()
//!     .add(Expr::tbl("issue_statuses", "is_closed").eq(false))
//!     .add(Expr::tbl("projects", "id").eq(1));
//!
//! let (sql, values) = SqliteQueryBuilder::new().build_condition(&cond);
//! assert_eq!(sql, r#""issue_statuses"."is_closed" = ? AND "projects"."id" = ?"#);
//! assert_eq!(values.len(), 2);
//! ```
//!
//! ## Backend Differences
//!
//! | Feature | PostgreSQL | MySQL | SQLite |
//! |---------|-----------|-------|--------|
//! | Identifier quoting | `"name"` | `` `name` `` | `"name"` |
//! | Placeholders | `$1, $2, ...` | `?, ?, ...` | `?, ?, ...` |

pub mod backend;
pub mod expr;
pub mod query;
pub mod types;
pub mod value;

pub use backend::{
	MySqlQueryBuilder, PostgresQueryBuilder, QueryBuilder, SqlWriter, SqliteQueryBuilder,
};
pub use expr::{
	Cond, Condition, ConditionExpression, ConditionType, Expr, ExprTrait, Func, IntoCondition,
	Keyword, SimpleExpr, SubQueryOper,
};
pub use query::{JoinExpr, Query, SelectStatement};
pub use types::{BinOper, ColumnRef, JoinType, UnOper};
pub use value::{Value, Values};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::backend::{
		MySqlQueryBuilder, PostgresQueryBuilder, QueryBuilder, SqliteQueryBuilder,
	};
	pub use crate::expr::{Cond, Condition, Expr, ExprTrait, IntoCondition, SimpleExpr};
	pub use crate::query::{Query, SelectStatement};
	pub use crate::types::{BinOper, ColumnRef};
	pub use crate::value::{Value, Values};
}
