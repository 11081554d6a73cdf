//! Parameter values carried by predicate expressions.
//!
//! Every user-supplied string, number or date ends up in a [`Value`] and is
//! bound as a placeholder by the backend. Values are only turned into SQL text
//! by [`Value::to_sql_literal`], which exists for logging.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A single bound parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
	/// Boolean value
	Bool(bool),
	/// 64-bit signed integer
	Int(i64),
	/// Text value
	String(String),
	/// Calendar date
	Date(NaiveDate),
	/// Date and time without time zone
	DateTime(NaiveDateTime),
}

impl Value {
	/// Render this value as an inline SQL literal.
	///
	/// Single quotes inside strings are doubled.
	///
	/// ```rust
	/// use watchfilter_query::Value;
	///
	/// assert_eq!(Value::Int(42).to_sql_literal(), "42");
	/// assert_eq!(Value::from("it's").to_sql_literal(), "'it''s'");
	/// ```
	#[must_use]
	pub fn to_sql_literal(&self) -> String {
		match self {
			Self::Bool(true) => "TRUE".to_string(),
			Self::Bool(false) => "FALSE".to_string(),
			Self::Int(v) => v.to_string(),
			Self::String(v) => format!("'{}'", v.replace('\'', "''")),
			Self::Date(v) => format!("'{}'", v.format("%Y-%m-%d")),
			Self::DateTime(v) => format!("'{}'", v.format("%Y-%m-%d %H:%M:%S%.f")),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Self::Int(i64::from(v))
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Self::String(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Self::String(v)
	}
}

impl From<&String> for Value {
	fn from(v: &String) -> Self {
		Self::String(v.clone())
	}
}

impl From<NaiveDate> for Value {
	fn from(v: NaiveDate) -> Self {
		Self::Date(v)
	}
}

impl From<NaiveDateTime> for Value {
	fn from(v: NaiveDateTime) -> Self {
		Self::DateTime(v)
	}
}

/// Ordered parameter list produced alongside rendered SQL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Values(pub Vec<Value>);

impl Values {
	/// Append a value.
	pub fn push(&mut self, value: Value) {
		self.0.push(value);
	}

	/// Number of collected values.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no value was collected.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterate over the collected values in placeholder order.
	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.0.iter()
	}
}

impl IntoIterator for Values {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
