//! SQL Backend implementations
//!
//! Backends render the predicate AST into `(sql, values)` pairs. The walk over
//! the AST is shared by every dialect through the provided methods of
//! [`QueryBuilder`]; a dialect only decides identifier quoting and placeholder
//! syntax.

use crate::expr::{Condition, ConditionExpression, SimpleExpr};
use crate::query::SelectStatement;
use crate::types::{BinOper, ColumnRef};
use crate::value::Values;

mod mysql;
mod postgres;
mod sql_writer;
mod sqlite;

pub use mysql::MySqlQueryBuilder;
pub use postgres::PostgresQueryBuilder;
pub use sql_writer::SqlWriter;
pub use sqlite::SqliteQueryBuilder;

/// Query builder trait for rendering predicates.
///
/// # Examples
///
/// ```rust
/// use watchfilter_query::prelude::*;
///
/// let cond = Cond::all()
///     .add(Expr::tbl("issues", "priority_id").is_in(["3", "5"]))
///     .add(Expr::tbl("projects", "id").eq(1));
///
/// let (sql, values) = PostgresQueryBuilder::new().build_condition(&cond);
/// assert_eq!(
///     sql,
///     r#""issues"."priority_id" IN ($1, $2) AND "projects"."id" = $3"#
/// );
/// assert_eq!(values.len(), 3);
/// ```
pub trait QueryBuilder {
	/// Escape an identifier (table name, column name).
	fn escape_identifier(&self, ident: &str) -> String;

	/// Placeholder for the parameter at `index` (1-based).
	fn placeholder(&self, index: usize) -> String;

	/// Render a condition chain as a standalone WHERE body.
	///
	/// An empty chain renders as an empty string.
	fn build_condition(&self, condition: &Condition) -> (String, Values) {
		let mut writer = SqlWriter::new();
		self.write_condition(&mut writer, condition, false);
		writer.finish()
	}

	/// Render a SELECT statement.
	fn build_select(&self, stmt: &SelectStatement) -> (String, Values) {
		let mut writer = SqlWriter::new();
		self.write_select(&mut writer, stmt);
		writer.finish()
	}

	/// Render a condition with values inlined as literals.
	///
	/// Only meant for logs and diagnostics; stores must use
	/// [`build_condition`](Self::build_condition).
	fn inline_condition(&self, condition: &Condition) -> String {
		let mut writer = SqlWriter::inline();
		self.write_condition(&mut writer, condition, false);
		writer.finish().0
	}

	/// Write a column reference.
	fn write_column_ref(&self, writer: &mut SqlWriter, column: &ColumnRef) {
		match column {
			ColumnRef::Column(name) => {
				writer.push_identifier(name, |s| self.escape_identifier(s));
			}
			ColumnRef::TableColumn(table, name) => {
				writer.push_identifier(table, |s| self.escape_identifier(s));
				writer.push(".");
				writer.push_identifier(name, |s| self.escape_identifier(s));
			}
		}
	}

	/// Write an expression.
	fn write_simple_expr(&self, writer: &mut SqlWriter, expr: &SimpleExpr) {
		match expr {
			SimpleExpr::Column(column) => self.write_column_ref(writer, column),
			SimpleExpr::Value(value) => {
				writer.push_value(value.clone(), |i| self.placeholder(i));
			}
			SimpleExpr::Binary(left, op, right) => match (op, right.as_ref()) {
				(BinOper::In, SimpleExpr::Tuple(items)) if items.is_empty() => {
					writer.push(crate::expr::Keyword::False.as_str());
				}
				(BinOper::NotIn, SimpleExpr::Tuple(items)) if items.is_empty() => {
					writer.push(crate::expr::Keyword::True.as_str());
				}
				_ => {
					self.write_operand(writer, left);
					writer.push_space();
					writer.push(op.as_str());
					writer.push_space();
					self.write_operand(writer, right);
				}
			},
			SimpleExpr::Unary(op, inner) => {
				writer.push(op.as_str());
				writer.push(" ");
				if matches!(inner.as_ref(), SimpleExpr::Binary(..)) {
					writer.push("(");
					self.write_simple_expr(writer, inner);
					writer.push(")");
				} else {
					self.write_simple_expr(writer, inner);
				}
			}
			SimpleExpr::FunctionCall(func, args) => {
				writer.push(func.as_str());
				writer.push("(");
				writer.push_list(args, ", ", |w, arg| self.write_simple_expr(w, arg));
				writer.push(")");
			}
			SimpleExpr::SubQuery(op, select) => {
				if let Some(op) = op {
					writer.push(op.as_str());
					writer.push(" ");
				}
				writer.push("(");
				self.write_select(writer, select);
				writer.push(")");
			}
			SimpleExpr::Tuple(items) => {
				writer.push("(");
				writer.push_list(items, ", ", |w, item| self.write_simple_expr(w, item));
				writer.push(")");
			}
			SimpleExpr::Constant(keyword) => writer.push(keyword.as_str()),
		}
	}

	/// Write an operand of a binary expression, parenthesizing nested logic.
	fn write_operand(&self, writer: &mut SqlWriter, expr: &SimpleExpr) {
		if is_logical(expr) {
			writer.push("(");
			self.write_simple_expr(writer, expr);
			writer.push(")");
		} else {
			self.write_simple_expr(writer, expr);
		}
	}

	/// Write a condition chain.
	///
	/// `nested` chains with more than one member are parenthesized.
	fn write_condition(&self, writer: &mut SqlWriter, condition: &Condition, nested: bool) {
		if condition.conditions.is_empty() {
			return;
		}

		if condition.negate {
			writer.push("NOT (");
			self.write_condition_members(writer, condition);
			writer.push(")");
			return;
		}

		let wrap = nested && condition.conditions.len() > 1;
		if wrap {
			writer.push("(");
		}
		self.write_condition_members(writer, condition);
		if wrap {
			writer.push(")");
		}
	}

	/// Write the members of a chain joined by its logical operator.
	fn write_condition_members(&self, writer: &mut SqlWriter, condition: &Condition) {
		let separator = format!(" {} ", condition.condition_type.logical_oper().as_str());
		let single = condition.conditions.len() == 1;
		writer.push_list(&condition.conditions, &separator, |w, member| match member {
			ConditionExpression::Condition(inner) => self.write_condition(w, inner, !single),
			ConditionExpression::SimpleExpr(expr) if single => self.write_simple_expr(w, expr),
			ConditionExpression::SimpleExpr(expr) => self.write_operand(w, expr),
		});
	}

	/// Write a SELECT statement.
	fn write_select(&self, writer: &mut SqlWriter, stmt: &SelectStatement) {
		writer.push("SELECT ");
		if stmt.columns().is_empty() {
			writer.push("*");
		} else {
			writer.push_list(stmt.columns(), ", ", |w, col| self.write_column_ref(w, col));
		}

		if let Some(table) = stmt.from_table() {
			writer.push_keyword("FROM ");
			writer.push_identifier(table, |s| self.escape_identifier(s));
		}

		for join in stmt.joins() {
			writer.push_keyword(join.join.as_str());
			writer.push(" ");
			writer.push_identifier(&join.table, |s| self.escape_identifier(s));
			if !join.on.is_empty() {
				writer.push_keyword("ON ");
				self.write_condition(writer, &join.on, false);
			}
		}

		if !stmt.where_condition().is_empty() {
			writer.push_keyword("WHERE ");
			self.write_condition(writer, stmt.where_condition(), false);
		}
	}
}

fn is_logical(expr: &SimpleExpr) -> bool {
	matches!(expr, SimpleExpr::Binary(_, op, _) if op.is_logical())
}
