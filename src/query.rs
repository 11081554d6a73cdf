//! Predicate AST and SQL renderers module.
//!
//! # Examples
//!
//! ```rust
//! use watchfilter::query::{Cond, Expr, ExprTrait, MySqlQueryBuilder, QueryBuilder};
//!
//! let cond = Cond::all().add(Expr::tbl("issues", "priority_id").is_in(["3", "5"]));
//! let (sql, values) = MySqlQueryBuilder::new().build_condition(&cond);
//! assert_eq!(sql, "`issues`.`priority_id` IN (?, ?)");
//! assert_eq!(values.len(), 2);
//! ```

pub use watchfilter_query::*;
