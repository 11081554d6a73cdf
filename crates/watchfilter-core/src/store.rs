//! Issue store interface
//!
//! The store executes compiled predicates. It receives the [`Condition`]
//! tree and renders it with whatever [`QueryBuilder`] matches its backend.
//!
//! [`QueryBuilder`]: watchfilter_query::QueryBuilder

use serde::{Deserialize, Serialize};
use thiserror::Error;
use watchfilter_query::Condition;

/// The store rejected a statement
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Statement invalid: {message}")]
pub struct StoreExecutionError {
	pub message: String,
}

impl StoreExecutionError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

/// Limit and offset for a store query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
	pub limit: Option<usize>,
	pub offset: Option<usize>,
}

impl QueryOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn offset(mut self, offset: usize) -> Self {
		self.offset = Some(offset);
		self
	}
}

/// A tracked-issue store able to evaluate a predicate
pub trait IssueStore {
	type Record;

	/// Fetch the records matching `predicate`; `None` means no restriction.
	fn execute(
		&self,
		predicate: Option<&Condition>,
		options: QueryOptions,
	) -> Result<Vec<Self::Record>, StoreExecutionError>;
}
