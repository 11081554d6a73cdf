//! SimpleExpr - the predicate AST.
//!
//! Every expression helper eventually produces a [`SimpleExpr`]; backends only
//! ever walk this enum.

use chrono::{NaiveDate, NaiveDateTime};

use crate::query::SelectStatement;
use crate::types::{BinOper, ColumnRef, UnOper};
use crate::value::Value;

/// Operators that bind a sub-select to the surrounding expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubQueryOper {
	Exists,
	NotExists,
}

impl SubQueryOper {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Exists => "EXISTS",
			Self::NotExists => "NOT EXISTS",
		}
	}
}

/// Scalar functions available to predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
	/// LOWER(text)
	Lower,
}

impl Func {
	/// Returns the SQL function name.
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Lower => "LOWER",
		}
	}
}

/// SQL keywords usable as constants.
///
/// `True` and `False` are standalone predicates ("always true" / "always
/// false") and render as `1 = 1` / `1 = 0` on every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
	Null,
	/// Predicate that holds for every row
	True,
	/// Predicate that holds for no row
	False,
}

impl Keyword {
	/// Text written for the keyword. Every backend shares it.
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Null => "NULL",
			Self::True => "1 = 1",
			Self::False => "1 = 0",
		}
	}
}

/// A predicate expression.
#[derive(Debug, Clone)]
pub enum SimpleExpr {
	/// A column reference (e.g. `issues.subject`)
	Column(ColumnRef),

	/// A bound value
	Value(Value),

	/// A unary operation (e.g. `NOT x`)
	Unary(UnOper, Box<SimpleExpr>),

	/// A binary operation (e.g. `x = y`, `a AND b`)
	Binary(Box<SimpleExpr>, BinOper, Box<SimpleExpr>),

	/// A function call (e.g. `LOWER(subject)`)
	FunctionCall(Func, Vec<SimpleExpr>),

	/// A parenthesized sub-select, optionally introduced by `EXISTS`
	SubQuery(Option<SubQueryOper>, Box<SelectStatement>),

	/// A value list (e.g. `('3', '5')`)
	Tuple(Vec<SimpleExpr>),

	/// A keyword constant
	Constant(Keyword),
}

impl From<Value> for SimpleExpr {
	fn from(value: Value) -> Self {
		Self::Value(value)
	}
}

impl From<ColumnRef> for SimpleExpr {
	fn from(column: ColumnRef) -> Self {
		Self::Column(column)
	}
}

impl From<Keyword> for SimpleExpr {
	fn from(keyword: Keyword) -> Self {
		Self::Constant(keyword)
	}
}

impl From<SelectStatement> for SimpleExpr {
	fn from(s: SelectStatement) -> Self {
		Self::SubQuery(None, Box::new(s))
	}
}

macro_rules! simple_expr_from_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for SimpleExpr {
				fn from(v: $ty) -> Self {
					Self::Value(Value::from(v))
				}
			}
		)*
	};
}

simple_expr_from_value!(bool, i32, i64, &str, String, &String, NaiveDate, NaiveDateTime);

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_string_becomes_bound_value() {
		let expr: SimpleExpr = "3".into();
		assert!(matches!(expr, SimpleExpr::Value(Value::String(ref s)) if s == "3"));
	}

	#[rstest]
	fn test_column_ref_stays_a_column() {
		let expr: SimpleExpr = ColumnRef::table_column("issues", "id").into();
		assert!(matches!(expr, SimpleExpr::Column(ColumnRef::TableColumn(_, _))));
	}

	#[rstest]
	fn test_constant_predicates() {
		assert_eq!(Keyword::Null.as_str(), "NULL");
		assert_eq!(Keyword::True.as_str(), "1 = 1");
		assert_eq!(Keyword::False.as_str(), "1 = 0");
	}
}
