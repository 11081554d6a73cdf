//! AND/OR chains used for WHERE clauses and join constraints.

use super::simple_expr::SimpleExpr;
use crate::types::BinOper;

/// How the members of a [`Condition`] are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionType {
	/// Conjunction
	#[default]
	All,
	/// Disjunction
	Any,
}

impl ConditionType {
	pub fn logical_oper(&self) -> BinOper {
		if *self == Self::Any {
			BinOper::Or
		} else {
			BinOper::And
		}
	}
}

/// Member of a chain: a leaf predicate or a nested chain
#[derive(Debug, Clone)]
pub enum ConditionExpression {
	SimpleExpr(SimpleExpr),
	Condition(Condition),
}

/// Chain of predicates joined by one logical operator.
///
/// An empty chain renders nothing; a filter that contributes no fragment
/// leaves the chain untouched.
///
/// ```rust
/// use watchfilter_query::{Cond, Expr, ExprTrait};
///
/// let open_in_main = Cond::all()
///     .add(Expr::tbl("issue_statuses", "is_closed").eq(false))
///     .add(Expr::tbl("projects", "id").eq(1));
/// assert_eq!(open_in_main.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Condition {
	pub condition_type: ConditionType,
	/// Render as `NOT (...)`
	pub negate: bool,
	pub conditions: Vec<ConditionExpression>,
}

impl Condition {
	pub fn new(condition_type: ConditionType) -> Self {
		Self {
			condition_type,
			..Self::default()
		}
	}

	pub fn all() -> Self {
		Self::default()
	}

	pub fn any() -> Self {
		Self::new(ConditionType::Any)
	}

	/// Append a member.
	#[must_use]
	#[allow(clippy::should_implement_trait)]
	pub fn add<C: IntoCondition>(mut self, member: C) -> Self {
		self.conditions.push(member.into_condition_expression());
		self
	}

	/// Append a member when one is given.
	#[must_use]
	pub fn add_option<C: IntoCondition>(self, member: Option<C>) -> Self {
		member.into_iter().fold(self, Self::add)
	}

	/// Flip negation of the whole chain.
	#[must_use]
	#[allow(clippy::should_implement_trait)]
	pub fn not(self) -> Self {
		Self {
			negate: !self.negate,
			..self
		}
	}

	pub fn is_empty(&self) -> bool {
		self.conditions.is_empty()
	}

	pub fn len(&self) -> usize {
		self.conditions.len()
	}
}

/// Entry points for building a [`Condition`]
pub struct Cond;

impl Cond {
	pub fn all() -> Condition {
		Condition::all()
	}

	pub fn any() -> Condition {
		Condition::any()
	}
}

/// Anything that can join a condition chain.
pub trait IntoCondition {
	fn into_condition_expression(self) -> ConditionExpression;

	/// The value as a chain of its own. Leaf predicates become a
	/// single-member AND chain.
	fn into_condition(self) -> Condition
	where
		Self: Sized,
	{
		match self.into_condition_expression() {
			ConditionExpression::Condition(chain) => chain,
			leaf => Condition {
				conditions: vec![leaf],
				..Condition::default()
			},
		}
	}
}

impl IntoCondition for ConditionExpression {
	fn into_condition_expression(self) -> ConditionExpression {
		self
	}
}

impl IntoCondition for Condition {
	fn into_condition_expression(self) -> ConditionExpression {
		ConditionExpression::Condition(self)
	}
}

impl IntoCondition for SimpleExpr {
	fn into_condition_expression(self) -> ConditionExpression {
		ConditionExpression::SimpleExpr(self)
	}
}

impl IntoCondition for super::expr::Expr {
	fn into_condition_expression(self) -> ConditionExpression {
		self.into_simple_expr().into_condition_expression()
	}
}
