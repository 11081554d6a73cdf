//! Field types, operators and field definitions
//!
//! Each filterable field has a [`FieldType`]; the type fixes which
//! [`Operator`]s are accepted for it. Operators travel as their short codes
//! (`"="`, `"!*"`, `">t-"`, ...) in stored filters and form input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::FilterError;

/// Comparison operator of a filter entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	/// `=` is one of the values
	Equals,
	/// `!` is none of the values
	NotEquals,
	/// `!*` has no value
	None,
	/// `*` has any value
	Any,
	/// `>=` at least
	GreaterOrEqual,
	/// `<=` at most
	LessOrEqual,
	/// `o` open status
	Open,
	/// `c` closed status
	Closed,
	/// `>t-` within the last N days
	InPastDays,
	/// `<t-` more than N days ago
	OlderThanDays,
	/// `t-` exactly N days ago
	DaysAgo,
	/// `>t+` more than N days ahead
	LaterThanDays,
	/// `<t+` within the next N days
	InNextDays,
	/// `t+` exactly N days ahead
	DaysAhead,
	/// `t` today
	Today,
	/// `w` this week
	ThisWeek,
	/// `~` contains
	Contains,
	/// `!~` does not contain
	NotContains,
}

impl Operator {
	pub const ALL: [Operator; 18] = [
		Operator::Equals,
		Operator::NotEquals,
		Operator::None,
		Operator::Any,
		Operator::GreaterOrEqual,
		Operator::LessOrEqual,
		Operator::Open,
		Operator::Closed,
		Operator::InPastDays,
		Operator::OlderThanDays,
		Operator::DaysAgo,
		Operator::LaterThanDays,
		Operator::InNextDays,
		Operator::DaysAhead,
		Operator::Today,
		Operator::ThisWeek,
		Operator::Contains,
		Operator::NotContains,
	];

	/// Short code used in stored filters
	pub fn code(&self) -> &'static str {
		match self {
			Self::Equals => "=",
			Self::NotEquals => "!",
			Self::None => "!*",
			Self::Any => "*",
			Self::GreaterOrEqual => ">=",
			Self::LessOrEqual => "<=",
			Self::Open => "o",
			Self::Closed => "c",
			Self::InPastDays => ">t-",
			Self::OlderThanDays => "<t-",
			Self::DaysAgo => "t-",
			Self::LaterThanDays => ">t+",
			Self::InNextDays => "<t+",
			Self::DaysAhead => "t+",
			Self::Today => "t",
			Self::ThisWeek => "w",
			Self::Contains => "~",
			Self::NotContains => "!~",
		}
	}

	/// Human readable label
	pub fn label(&self) -> &'static str {
		match self {
			Self::Equals => "is",
			Self::NotEquals => "is not",
			Self::None => "none",
			Self::Any => "all",
			Self::GreaterOrEqual => ">=",
			Self::LessOrEqual => "<=",
			Self::Open => "open",
			Self::Closed => "closed",
			Self::InPastDays => "less than days ago",
			Self::OlderThanDays => "more than days ago",
			Self::DaysAgo => "days ago",
			Self::LaterThanDays => "in more than",
			Self::InNextDays => "in less than",
			Self::DaysAhead => "in",
			Self::Today => "today",
			Self::ThisWeek => "this week",
			Self::Contains => "contains",
			Self::NotContains => "doesn't contain",
		}
	}

	/// Whether the first value of the entry is read by this operator
	pub fn needs_value(&self) -> bool {
		matches!(
			self,
			Self::GreaterOrEqual
				| Self::LessOrEqual
				| Self::InPastDays
				| Self::OlderThanDays
				| Self::DaysAgo
				| Self::LaterThanDays
				| Self::InNextDays
				| Self::DaysAhead
				| Self::Contains
				| Self::NotContains
		)
	}
}

impl fmt::Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

impl FromStr for Operator {
	type Err = FilterError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.iter()
			.copied()
			.find(|op| op.code() == s)
			.ok_or_else(|| FilterError::UnknownOperator(s.to_string()))
	}
}

impl Serialize for Operator {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.code())
	}
}

impl<'de> Deserialize<'de> for Operator {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let code = String::deserialize(deserializer)?;
		code.parse().map_err(serde::de::Error::custom)
	}
}

/// Type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
	StatusList,
	List,
	ListOptional,
	SubprojectList,
	Date,
	DatePast,
	String,
	Text,
	Integer,
	TagList,
}

impl FieldType {
	/// Operators accepted by fields of this type
	pub fn operators(&self) -> &'static [Operator] {
		use Operator::*;
		match self {
			Self::StatusList => &[Open, Equals, NotEquals, Closed, Any],
			Self::List => &[Equals, NotEquals],
			Self::ListOptional => &[Equals, NotEquals, None, Any],
			Self::SubprojectList => &[Any, None, Equals],
			Self::Date => &[
				InNextDays,
				LaterThanDays,
				DaysAhead,
				Today,
				ThisWeek,
				InPastDays,
				OlderThanDays,
				DaysAgo,
			],
			Self::DatePast => &[InPastDays, OlderThanDays, DaysAgo, Today, ThisWeek],
			Self::String => &[Equals, Contains, NotEquals, NotContains],
			Self::Text => &[Contains, NotContains],
			Self::Integer => &[Equals, GreaterOrEqual, LessOrEqual, None, Any],
			Self::TagList => &[Equals, NotEquals, None, Any],
		}
	}

	pub fn supports(&self, operator: Operator) -> bool {
		self.operators().contains(&operator)
	}

	/// Whether fields of this type offer a fixed set of values
	pub fn has_values(&self) -> bool {
		matches!(
			self,
			Self::StatusList | Self::List | Self::ListOptional | Self::SubprojectList | Self::TagList
		)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::StatusList => "status_list",
			Self::List => "list",
			Self::ListOptional => "list_optional",
			Self::SubprojectList => "subproject_list",
			Self::Date => "date",
			Self::DatePast => "date_past",
			Self::String => "string",
			Self::Text => "text",
			Self::Integer => "integer",
			Self::TagList => "tag_list",
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A selectable value: display label and stored value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct FilterOption {
	pub label: String,
	pub value: String,
}

impl FilterOption {
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

impl From<(String, String)> for FilterOption {
	fn from((label, value): (String, String)) -> Self {
		Self { label, value }
	}
}

impl From<FilterOption> for (String, String) {
	fn from(option: FilterOption) -> Self {
		(option.label, option.value)
	}
}

/// A field registered for filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
	pub key: String,
	pub field_type: FieldType,
	pub order: u32,
	pub name: String,
	pub values: Vec<FilterOption>,
}

impl FieldDefinition {
	pub fn new(
		key: impl Into<String>,
		field_type: FieldType,
		order: u32,
		name: impl Into<String>,
	) -> Self {
		Self {
			key: key.into(),
			field_type,
			order,
			name: name.into(),
			values: Vec::new(),
		}
	}

	pub fn with_values(mut self, values: Vec<FilterOption>) -> Self {
		self.values = values;
		self
	}

	/// Validate an operator against the field type
	pub fn check_operator(&self, operator: Operator) -> Result<(), FilterError> {
		if self.field_type.supports(operator) {
			Ok(())
		} else {
			Err(FilterError::UnsupportedOperator {
				field: self.key.clone(),
				operator: operator.code().to_string(),
				field_type: self.field_type,
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_every_code_parses_back() {
		for op in Operator::ALL {
			assert_eq!(op.code().parse::<Operator>().unwrap(), op);
		}
	}

	#[rstest]
	#[case("")]
	#[case("==")]
	#[case("t-1")]
	fn test_unknown_operator(#[case] code: &str) {
		let result = code.parse::<Operator>();
		assert!(matches!(result, Err(FilterError::UnknownOperator(c)) if c == code));
	}

	#[rstest]
	#[case(FieldType::StatusList, Operator::Open, true)]
	#[case(FieldType::StatusList, Operator::Contains, false)]
	#[case(FieldType::List, Operator::None, false)]
	#[case(FieldType::ListOptional, Operator::None, true)]
	#[case(FieldType::DatePast, Operator::InNextDays, false)]
	#[case(FieldType::Date, Operator::InNextDays, true)]
	#[case(FieldType::Text, Operator::Equals, false)]
	#[case(FieldType::Integer, Operator::GreaterOrEqual, true)]
	#[case(FieldType::TagList, Operator::Any, true)]
	#[case(FieldType::SubprojectList, Operator::NotEquals, false)]
	fn test_field_type_supports(
		#[case] field_type: FieldType,
		#[case] operator: Operator,
		#[case] expected: bool,
	) {
		assert_eq!(field_type.supports(operator), expected);
	}

	#[rstest]
	fn test_operator_serde_uses_codes() {
		let json = serde_json::to_string(&Operator::OlderThanDays).unwrap();
		assert_eq!(json, "\"<t-\"");
		let op: Operator = serde_json::from_str("\"!~\"").unwrap();
		assert_eq!(op, Operator::NotContains);
		assert!(serde_json::from_str::<Operator>("\"??\"").is_err());
	}

	#[rstest]
	fn test_filter_option_serializes_as_pair() {
		let json = serde_json::to_value(FilterOption::new("Bug", "1")).unwrap();
		assert_eq!(json, serde_json::json!(["Bug", "1"]));
	}

	#[rstest]
	fn test_check_operator() {
		let field = FieldDefinition::new("subject", FieldType::Text, 8, "Subject");
		assert!(field.check_operator(Operator::Contains).is_ok());
		let err = field.check_operator(Operator::GreaterOrEqual).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Operator '>=' is not supported by field 'subject' of type text"
		);
	}
}
