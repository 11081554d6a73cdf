//! PostgreSQL dialect: double-quoted identifiers and `$n` placeholders.

use super::QueryBuilder;

/// PostgreSQL query builder
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresQueryBuilder;

impl PostgresQueryBuilder {
	/// Create a new PostgreSQL query builder
	pub fn new() -> Self {
		Self
	}
}

impl QueryBuilder for PostgresQueryBuilder {
	fn escape_identifier(&self, ident: &str) -> String {
		format!("\"{}\"", ident.replace('"', "\"\""))
	}

	fn placeholder(&self, index: usize) -> String {
		format!("${}", index)
	}
}
