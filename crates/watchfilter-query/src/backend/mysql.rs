//! MySQL dialect: backtick identifiers and `?` placeholders.

use super::QueryBuilder;

/// MySQL query builder
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlQueryBuilder;

impl MySqlQueryBuilder {
	/// Create a new MySQL query builder
	pub fn new() -> Self {
		Self
	}
}

impl QueryBuilder for MySqlQueryBuilder {
	fn escape_identifier(&self, ident: &str) -> String {
		format!("`{}`", ident.replace('`', "``"))
	}

	fn placeholder(&self, _index: usize) -> String {
		"?".to_string()
	}
}
