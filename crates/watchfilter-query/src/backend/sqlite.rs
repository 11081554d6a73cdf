//! SQLite dialect: double-quoted identifiers and `?` placeholders.

use super::QueryBuilder;

/// SQLite query builder
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteQueryBuilder;

impl SqliteQueryBuilder {
	/// Create a new SQLite query builder
	pub fn new() -> Self {
		Self
	}
}

impl QueryBuilder for SqliteQueryBuilder {
	fn escape_identifier(&self, ident: &str) -> String {
		format!("\"{}\"", ident.replace('"', "\"\""))
	}

	fn placeholder(&self, _index: usize) -> String {
		"?".to_string()
	}
}
