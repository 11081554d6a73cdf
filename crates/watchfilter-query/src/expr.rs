//! Expression system for predicates.
//!
//! - [`SimpleExpr`]: the core expression AST
//! - [`Expr`]: builder for creating expressions
//! - [`ExprTrait`]: comparison, membership and logical operations
//! - [`Condition`] and [`Cond`]: AND/OR chains

mod condition;
#[allow(clippy::module_inception)]
mod expr;
mod simple_expr;

pub use condition::{Cond, Condition, ConditionExpression, ConditionType, IntoCondition};
pub use expr::{Expr, ExprTrait};
pub use simple_expr::{Func, Keyword, SimpleExpr, SubQueryOper};
