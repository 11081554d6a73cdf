//! Expr - the expression builder and [`ExprTrait`] operations.

use super::simple_expr::{Func, Keyword, SimpleExpr, SubQueryOper};
use crate::query::SelectStatement;
use crate::types::{BinOper, ColumnRef, UnOper};

/// Expression builder.
///
/// ```rust
/// use watchfilter_query::{Expr, ExprTrait};
///
/// let expr = Expr::tbl("issues", "priority_id").is_in(["3", "5"]);
/// ```
#[derive(Debug, Clone)]
pub struct Expr(SimpleExpr);

impl Expr {
	/// Bare column expression.
	pub fn col(column: impl Into<String>) -> Self {
		Self(SimpleExpr::Column(ColumnRef::column(column)))
	}

	/// Table-qualified column expression.
	pub fn tbl(table: impl Into<String>, column: impl Into<String>) -> Self {
		Self(SimpleExpr::Column(ColumnRef::table_column(table, column)))
	}

	/// Column expression from an existing reference.
	pub fn column(column: ColumnRef) -> Self {
		Self(SimpleExpr::Column(column))
	}

	/// Bound value expression.
	pub fn val<V>(value: V) -> Self
	where
		V: Into<SimpleExpr>,
	{
		Self(value.into())
	}

	/// Predicate that matches every row.
	pub fn always_true() -> SimpleExpr {
		SimpleExpr::Constant(Keyword::True)
	}

	/// Predicate that matches no row.
	pub fn always_false() -> SimpleExpr {
		SimpleExpr::Constant(Keyword::False)
	}

	/// `EXISTS (subquery)`
	pub fn exists(select: SelectStatement) -> SimpleExpr {
		SimpleExpr::SubQuery(Some(SubQueryOper::Exists), Box::new(select))
	}

	/// `NOT EXISTS (subquery)`
	pub fn not_exists(select: SelectStatement) -> SimpleExpr {
		SimpleExpr::SubQuery(Some(SubQueryOper::NotExists), Box::new(select))
	}

	/// Unwrap into the underlying AST node.
	pub fn into_simple_expr(self) -> SimpleExpr {
		self.0
	}
}

impl From<Expr> for SimpleExpr {
	fn from(e: Expr) -> Self {
		e.0
	}
}

/// Operations shared by [`Expr`] and [`SimpleExpr`].
pub trait ExprTrait: Sized {
	/// Convert into the AST node.
	fn into_expr(self) -> SimpleExpr;

	/// Build `self <op> right`.
	fn binary<R>(self, op: BinOper, right: R) -> SimpleExpr
	where
		R: Into<SimpleExpr>,
	{
		SimpleExpr::Binary(Box::new(self.into_expr()), op, Box::new(right.into()))
	}

	/// `self = v`
	fn eq<V: Into<SimpleExpr>>(self, v: V) -> SimpleExpr {
		self.binary(BinOper::Equal, v)
	}

	/// `self <> v`
	fn ne<V: Into<SimpleExpr>>(self, v: V) -> SimpleExpr {
		self.binary(BinOper::NotEqual, v)
	}

	/// `self >= v`
	fn gte<V: Into<SimpleExpr>>(self, v: V) -> SimpleExpr {
		self.binary(BinOper::GreaterThanOrEqual, v)
	}

	/// `self <= v`
	fn lte<V: Into<SimpleExpr>>(self, v: V) -> SimpleExpr {
		self.binary(BinOper::SmallerThanOrEqual, v)
	}

	/// `self > v`
	fn gt<V: Into<SimpleExpr>>(self, v: V) -> SimpleExpr {
		self.binary(BinOper::GreaterThan, v)
	}

	/// `self < v`
	fn lt<V: Into<SimpleExpr>>(self, v: V) -> SimpleExpr {
		self.binary(BinOper::SmallerThan, v)
	}

	/// `self LIKE pattern`
	fn like<V: Into<SimpleExpr>>(self, pattern: V) -> SimpleExpr {
		self.binary(BinOper::Like, pattern)
	}

	/// `self NOT LIKE pattern`
	fn not_like<V: Into<SimpleExpr>>(self, pattern: V) -> SimpleExpr {
		self.binary(BinOper::NotLike, pattern)
	}

	/// `self IN (v1, v2, ...)`
	fn is_in<I, V>(self, values: I) -> SimpleExpr
	where
		I: IntoIterator<Item = V>,
		V: Into<SimpleExpr>,
	{
		let items = values.into_iter().map(Into::into).collect();
		self.binary(BinOper::In, SimpleExpr::Tuple(items))
	}

	/// `self NOT IN (v1, v2, ...)`
	fn is_not_in<I, V>(self, values: I) -> SimpleExpr
	where
		I: IntoIterator<Item = V>,
		V: Into<SimpleExpr>,
	{
		let items = values.into_iter().map(Into::into).collect();
		self.binary(BinOper::NotIn, SimpleExpr::Tuple(items))
	}

	/// `self IN (SELECT ...)`
	fn in_subquery(self, select: SelectStatement) -> SimpleExpr {
		self.binary(BinOper::In, select)
	}

	/// `self NOT IN (SELECT ...)`
	fn not_in_subquery(self, select: SelectStatement) -> SimpleExpr {
		self.binary(BinOper::NotIn, select)
	}

	/// `self IS NULL`
	fn is_null(self) -> SimpleExpr {
		self.binary(BinOper::Is, Keyword::Null)
	}

	/// `self IS NOT NULL`
	fn is_not_null(self) -> SimpleExpr {
		self.binary(BinOper::IsNot, Keyword::Null)
	}

	/// `self AND right`
	fn and<R: Into<SimpleExpr>>(self, right: R) -> SimpleExpr {
		self.binary(BinOper::And, right)
	}

	/// `self OR right`
	fn or<R: Into<SimpleExpr>>(self, right: R) -> SimpleExpr {
		self.binary(BinOper::Or, right)
	}

	/// `NOT self`
	fn not(self) -> SimpleExpr {
		SimpleExpr::Unary(UnOper::Not, Box::new(self.into_expr()))
	}

	/// `LOWER(self)`
	fn lower(self) -> SimpleExpr {
		SimpleExpr::FunctionCall(Func::Lower, vec![self.into_expr()])
	}
}

impl ExprTrait for Expr {
	fn into_expr(self) -> SimpleExpr {
		self.0
	}
}

impl ExprTrait for SimpleExpr {
	fn into_expr(self) -> SimpleExpr {
		self
	}
}
