//! Sub-select statements.
//!
//! Predicates reach into side tables (custom values, watchers, taggings)
//! through correlated sub-selects; [`SelectStatement`] covers exactly that
//! shape: a column list, one source table, joins with an `ON` condition and a
//! `WHERE` chain.
//!
//! ```rust
//! use watchfilter_query::prelude::*;
//!
//! let watched = Query::select()
//!     .column(ColumnRef::table_column("watchers", "watchable_id"))
//!     .from("watchers")
//!     .and_where(Expr::tbl("watchers", "watchable_type").eq("Issue"))
//!     .to_owned();
//!
//! let (sql, values) = PostgresQueryBuilder::new().build_select(&watched);
//! assert_eq!(
//!     sql,
//!     r#"SELECT "watchers"."watchable_id" FROM "watchers" WHERE "watchers"."watchable_type" = $1"#
//! );
//! assert_eq!(values.len(), 1);
//! ```

use crate::expr::{Condition, IntoCondition};
use crate::types::{ColumnRef, JoinType};

/// A join clause of a [`SelectStatement`].
#[derive(Debug, Clone)]
pub struct JoinExpr {
	/// Join flavour
	pub join: JoinType,
	/// Joined table
	pub table: String,
	/// `ON` condition
	pub on: Condition,
}

/// SELECT statement used as a predicate sub-query.
#[derive(Debug, Clone, Default)]
pub struct SelectStatement {
	pub(crate) columns: Vec<ColumnRef>,
	pub(crate) from: Option<String>,
	pub(crate) joins: Vec<JoinExpr>,
	pub(crate) r#where: Condition,
}

impl SelectStatement {
	/// Create an empty statement.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a selected column.
	pub fn column(&mut self, column: ColumnRef) -> &mut Self {
		self.columns.push(column);
		self
	}

	/// Set the source table.
	pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
		self.from = Some(table.into());
		self
	}

	/// Add a `LEFT OUTER JOIN`.
	pub fn left_join<C>(&mut self, table: impl Into<String>, on: C) -> &mut Self
	where
		C: IntoCondition,
	{
		self.join(JoinType::LeftJoin, table, on)
	}

	/// Add an `INNER JOIN`.
	pub fn inner_join<C>(&mut self, table: impl Into<String>, on: C) -> &mut Self
	where
		C: IntoCondition,
	{
		self.join(JoinType::InnerJoin, table, on)
	}

	/// Add a join of the given flavour.
	pub fn join<C>(&mut self, join: JoinType, table: impl Into<String>, on: C) -> &mut Self
	where
		C: IntoCondition,
	{
		self.joins.push(JoinExpr {
			join,
			table: table.into(),
			on: on.into_condition(),
		});
		self
	}

	/// AND a condition onto the `WHERE` chain.
	pub fn and_where<C>(&mut self, condition: C) -> &mut Self
	where
		C: IntoCondition,
	{
		let current = std::mem::take(&mut self.r#where);
		self.r#where = current.add(condition);
		self
	}

	/// Selected columns.
	pub fn columns(&self) -> &[ColumnRef] {
		&self.columns
	}

	/// Source table.
	pub fn from_table(&self) -> Option<&str> {
		self.from.as_deref()
	}

	/// Join clauses.
	pub fn joins(&self) -> &[JoinExpr] {
		&self.joins
	}

	/// The `WHERE` chain.
	pub fn where_condition(&self) -> &Condition {
		&self.r#where
	}
}

/// Entry point for statement builders.
pub struct Query;

impl Query {
	/// Start a SELECT statement.
	pub fn select() -> SelectStatement {
		SelectStatement::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::expr::{Expr, ExprTrait};
	use rstest::rstest;

	#[rstest]
	fn test_select_builder_collects_parts() {
		let stmt = Query::select()
			.column(ColumnRef::table_column("issues", "id"))
			.from("issues")
			.left_join(
				"custom_values",
				Expr::tbl("custom_values", "customized_type").eq("Issue"),
			)
			.and_where(Expr::tbl("custom_values", "value").is_null())
			.and_where(Expr::tbl("custom_values", "value").eq(""))
			.to_owned();

		assert_eq!(stmt.columns().len(), 1);
		assert_eq!(stmt.from_table(), Some("issues"));
		assert_eq!(stmt.joins().len(), 1);
		assert_eq!(stmt.joins()[0].join, JoinType::LeftJoin);
		assert_eq!(stmt.where_condition().len(), 2);
	}
}
