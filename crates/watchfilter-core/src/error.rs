use std::fmt;

use thiserror::Error;

use crate::directory::ProjectId;
use crate::field::FieldType;
use crate::settings::SettingsError;
use crate::store::StoreExecutionError;

/// Errors raised while building, validating or compiling filters
#[derive(Debug, Error)]
pub enum FilterError {
	/// Form input for a field did not carry a value sequence
	#[error("Values for filter field '{field}' must be a list")]
	InvalidValueSet { field: String },

	/// Operator code is not part of the operator table
	#[error("Unknown filter operator: '{0}'")]
	UnknownOperator(String),

	/// Operator exists but is not allowed for the field's type
	#[error("Operator '{operator}' is not supported by field '{field}' of type {field_type}")]
	UnsupportedOperator {
		field: String,
		operator: String,
		field_type: FieldType,
	},

	/// Anchor project is unknown to the hierarchy provider
	#[error("Project not found: {0}")]
	ProjectNotFound(ProjectId),

	/// Filter record failed validation
	#[error("Filter is invalid: {}", join_errors(.0))]
	Validation(Vec<FieldError>),

	/// The store rejected the generated statement
	#[error(transparent)]
	StatementInvalid(#[from] StoreExecutionError),

	/// Configuration error
	#[error(transparent)]
	Settings(#[from] SettingsError),
}

/// Result type for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;

/// What went wrong with a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
	/// Required attribute is missing
	Blank,
	/// Field key is not in the registry
	UnknownField,
	/// Operator is not allowed for the field's type
	UnsupportedOperator,
	/// Operator needs a first value and none was given
	MissingValue,
}

impl fmt::Display for FieldErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let message = match self {
			Self::Blank => "can't be blank",
			Self::UnknownField => "is not a known filter",
			Self::UnsupportedOperator => "has an unsupported operator",
			Self::MissingValue => "needs a value",
		};
		f.write_str(message)
	}
}

/// A validation error attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
	pub field: String,
	pub kind: FieldErrorKind,
}

impl FieldError {
	pub fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
		Self {
			field: field.into(),
			kind,
		}
	}
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.field, self.kind)
	}
}

fn join_errors(errors: &[FieldError]) -> String {
	errors
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_validation_message_lists_fields() {
		let err = FilterError::Validation(vec![
			FieldError::new("name", FieldErrorKind::Blank),
			FieldError::new("bogus_field", FieldErrorKind::UnknownField),
		]);
		assert_eq!(
			err.to_string(),
			"Filter is invalid: name can't be blank, bogus_field is not a known filter"
		);
	}

	#[rstest]
	fn test_statement_invalid_is_transparent() {
		let err: FilterError = StoreExecutionError::new("expression too long").into();
		assert!(matches!(err, FilterError::StatementInvalid(_)));
		assert_eq!(err.to_string(), "Statement invalid: expression too long");
	}
}
