//! Identifier and operator types.
//!
//! - [`ColumnRef`]: a column, optionally qualified by its table
//! - [`BinOper`] / [`UnOper`]: operators usable in predicate expressions
//! - [`JoinType`]: join flavours understood by [`SelectStatement`](crate::SelectStatement)

/// Reference to a column in a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnRef {
	/// Bare column (e.g. `name`)
	Column(String),
	/// Table-qualified column (e.g. `issues.status_id`)
	TableColumn(String, String),
}

impl ColumnRef {
	/// Create a bare column reference.
	pub fn column(column: impl Into<String>) -> Self {
		Self::Column(column.into())
	}

	/// Column qualified by its table.
	///
	/// ```rust
	/// use watchfilter_query::ColumnRef;
	///
	/// let col = ColumnRef::table_column("issues", "priority_id");
	/// assert_eq!(col.table(), Some("issues"));
	/// assert_eq!(col.name(), "priority_id");
	/// ```
	pub fn table_column(table: impl Into<String>, column: impl Into<String>) -> Self {
		Self::TableColumn(table.into(), column.into())
	}

	/// The qualifying table, if any.
	pub fn table(&self) -> Option<&str> {
		match self {
			Self::Column(_) => None,
			Self::TableColumn(table, _) => Some(table),
		}
	}

	/// The column name without qualification.
	pub fn name(&self) -> &str {
		match self {
			Self::Column(column) | Self::TableColumn(_, column) => column,
		}
	}
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOper {
	Not,
}

impl UnOper {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Not => "NOT",
		}
	}
}

/// Operators joining two operands. [`BinOper::as_str`] gives the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOper {
	And,
	Or,
	// comparison
	Equal,
	NotEqual,
	SmallerThan,
	SmallerThanOrEqual,
	GreaterThan,
	GreaterThanOrEqual,
	// pattern and membership
	Like,
	NotLike,
	In,
	NotIn,
	// null tests
	Is,
	IsNot,
}

impl BinOper {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::And => "AND",
			Self::Or => "OR",
			Self::Equal => "=",
			Self::NotEqual => "<>",
			Self::SmallerThan => "<",
			Self::SmallerThanOrEqual => "<=",
			Self::GreaterThan => ">",
			Self::GreaterThanOrEqual => ">=",
			Self::Like => "LIKE",
			Self::NotLike => "NOT LIKE",
			Self::In => "IN",
			Self::NotIn => "NOT IN",
			Self::Is => "IS",
			Self::IsNot => "IS NOT",
		}
	}

	/// Logical operators need their operands parenthesized when nested.
	pub fn is_logical(&self) -> bool {
		matches!(self, Self::And | Self::Or)
	}
}

/// Join flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
	/// INNER JOIN
	InnerJoin,
	/// LEFT OUTER JOIN
	LeftJoin,
}

impl JoinType {
	/// Returns the SQL keyword for this join.
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::InnerJoin => "INNER JOIN",
			Self::LeftJoin => "LEFT OUTER JOIN",
		}
	}
}
