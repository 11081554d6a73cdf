//! Output buffer shared by the backends
//!
//! [`SqlWriter`] collects statement text together with the values bound to
//! its placeholders. A writer created with [`SqlWriter::inline`] writes
//! literals instead; backends only use that for log output.

use crate::value::{Value, Values};

/// What happens to a value pushed into the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueMode {
	/// Write a dialect placeholder and keep the value for binding
	Bind,
	/// Write the value as a quoted literal
	Inline,
}

/// Statement text and bound values under construction
#[derive(Debug, Clone)]
pub struct SqlWriter {
	sql: String,
	values: Values,
	mode: ValueMode,
}

impl Default for SqlWriter {
	fn default() -> Self {
		Self::new()
	}
}

impl SqlWriter {
	/// Writer that binds values through placeholders
	pub fn new() -> Self {
		Self {
			sql: String::new(),
			values: Values::default(),
			mode: ValueMode::Bind,
		}
	}

	/// Writer that inlines values as SQL literals
	pub fn inline() -> Self {
		Self {
			mode: ValueMode::Inline,
			..Self::new()
		}
	}

	pub fn push(&mut self, s: &str) {
		self.sql.push_str(s);
	}

	/// Separate the next token with a single space
	pub fn push_space(&mut self) {
		if !(self.sql.is_empty() || self.sql.ends_with(' ')) {
			self.sql.push(' ');
		}
	}

	pub fn push_identifier<F>(&mut self, ident: &str, escape: F)
	where
		F: FnOnce(&str) -> String,
	{
		let escaped = escape(ident);
		self.sql.push_str(&escaped);
	}

	/// Write a value.
	///
	/// `placeholder` receives the 1-based position of the value among the
	/// bound ones and is not called for inline writers.
	pub fn push_value<F>(&mut self, value: Value, placeholder: F)
	where
		F: FnOnce(usize) -> String,
	{
		match self.mode {
			ValueMode::Inline => self.sql.push_str(&value.to_sql_literal()),
			ValueMode::Bind => {
				self.values.push(value);
				let marker = placeholder(self.values.len());
				self.sql.push_str(&marker);
			}
		}
	}

	/// Write a keyword such as `FROM` or `WHERE` after a space
	pub fn push_keyword(&mut self, keyword: &str) {
		self.push_space();
		self.push(keyword);
	}

	/// Write items separated by `separator`
	pub fn push_list<I, T, F>(&mut self, items: I, separator: &str, mut write: F)
	where
		I: IntoIterator<Item = T>,
		F: FnMut(&mut Self, T),
	{
		for (index, item) in items.into_iter().enumerate() {
			if index > 0 {
				self.push(separator);
			}
			write(self, item);
		}
	}

	/// Statement text and the values to bind, in placeholder order
	pub fn finish(self) -> (String, Values) {
		(self.sql, self.values)
	}
}
