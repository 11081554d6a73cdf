//! Filter sets
//!
//! A [`FilterSet`] maps field keys to an operator and a value list. New sets
//! start with the default "open issues" status entry. Entries added through
//! [`FilterSet::add_filter`] are checked against a [`FieldRegistry`].

use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldError, FieldErrorKind, FilterError, Result};
use crate::field::Operator;
use crate::registry::FieldRegistry;

static SHORT_FILTER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(o|c|!\*|!|\*)?(.*)$").expect("SHORT_FILTER: invalid regex pattern")
});

/// Operator and values of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
	pub operator: Operator,
	#[serde(default)]
	pub values: Vec<String>,
}

impl FilterEntry {
	pub fn new<I, S>(operator: Operator, values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			operator,
			values: values.into_iter().map(Into::into).collect(),
		}
	}
}

/// Field key to entry mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
	entries: IndexMap<String, FilterEntry>,
}

impl Default for FilterSet {
	fn default() -> Self {
		Self::new()
	}
}

impl FilterSet {
	/// A filter set restricted to open issues
	pub fn new() -> Self {
		let mut set = Self::empty();
		set.insert("status_id", FilterEntry::new(Operator::Open, [""]));
		set
	}

	/// A filter set without entries
	pub fn empty() -> Self {
		Self {
			entries: IndexMap::new(),
		}
	}

	/// Insert an entry without registry checks
	pub fn insert(&mut self, field: impl Into<String>, entry: FilterEntry) {
		self.entries.insert(field.into(), entry);
	}

	pub fn remove(&mut self, field: &str) -> Option<FilterEntry> {
		self.entries.shift_remove(field)
	}

	pub fn get(&self, field: &str) -> Option<&FilterEntry> {
		self.entries.get(field)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterEntry)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn has_filter(&self, field: &str) -> bool {
		self.entries.contains_key(field)
	}

	pub fn operator_for(&self, field: &str) -> Option<Operator> {
		self.entries.get(field).map(|e| e.operator)
	}

	pub fn values_for(&self, field: &str) -> Option<&[String]> {
		self.entries.get(field).map(|e| e.values.as_slice())
	}

	pub fn value_for(&self, field: &str, index: usize) -> Option<&str> {
		self.values_for(field)
			.and_then(|values| values.get(index))
			.map(String::as_str)
	}

	/// Add or replace an entry.
	///
	/// Entries without a value list and fields unknown to the registry are
	/// ignored and `Ok(false)` is returned. Operators that take no value
	/// still expect a list, conventionally `[""]`.
	pub fn add_filter(
		&mut self,
		registry: &FieldRegistry,
		field: &str,
		operator: &str,
		values: Option<Vec<String>>,
	) -> Result<bool> {
		let Some(values) = values else {
			debug!(field, "Ignoring filter without values");
			return Ok(false);
		};
		let Some(definition) = registry.get(field) else {
			debug!(field, "Ignoring filter on unknown field");
			return Ok(false);
		};

		let operator: Operator = operator.parse()?;
		definition.check_operator(operator)?;

		self.insert(field, FilterEntry { operator, values });
		Ok(true)
	}

	/// Add an entry from a short expression such as `"!*"`, `"c"` or `"!3"`.
	///
	/// A leading `o`, `c`, `!*`, `!` or `*` is the operator (`=` when absent)
	/// and the remainder is the single value.
	pub fn add_short_filter(
		&mut self,
		registry: &FieldRegistry,
		field: &str,
		expression: &str,
	) -> Result<bool> {
		let Some(captures) = SHORT_FILTER.captures(expression) else {
			debug!(field, expression, "Ignoring malformed short filter");
			return Ok(false);
		};

		let operator = captures.get(1).map_or("=", |m| m.as_str());
		let value = captures.get(2).map_or("", |m| m.as_str());
		self.add_filter(registry, field, operator, Some(vec![value.to_string()]))
	}

	/// Add entries from form parameters.
	///
	/// Each field goes through [`add_filter`](Self::add_filter); entries that
	/// fail are skipped and their errors returned.
	pub fn add_filters(&mut self, registry: &FieldRegistry, params: &FilterParams) -> Vec<FilterError> {
		let mut errors = Vec::new();

		for field in &params.fields {
			let operator = params.operators.get(field).map_or("", String::as_str);
			let result = params
				.values_for(field)
				.and_then(|values| self.add_filter(registry, field, operator, values));
			if let Err(err) = result {
				debug!(field = %field, error = %err, "Skipping filter entry");
				errors.push(err);
			}
		}

		errors
	}

	/// Check every entry against the registry
	pub fn validate(&self, registry: &FieldRegistry) -> std::result::Result<(), Vec<FieldError>> {
		let mut errors = Vec::new();

		for (field, entry) in &self.entries {
			let Some(definition) = registry.get(field) else {
				errors.push(FieldError::new(field.as_str(), FieldErrorKind::UnknownField));
				continue;
			};
			if !definition.field_type.supports(entry.operator) {
				errors.push(FieldError::new(field.as_str(), FieldErrorKind::UnsupportedOperator));
			} else if entry.operator.needs_value()
				&& entry.values.first().is_none_or(|v| v.trim().is_empty())
			{
				errors.push(FieldError::new(field.as_str(), FieldErrorKind::MissingValue));
			}
		}

		if errors.is_empty() {
			Ok(())
		} else {
			Err(errors)
		}
	}
}

/// Filter form parameters
///
/// Accepts both the long names and the short `f`/`op`/`v` aliases:
///
/// ```rust
/// use watchfilter_core::filter_set::FilterParams;
///
/// let params: FilterParams = serde_json::from_str(
///     r#"{"f": ["priority_id"], "op": {"priority_id": "="}, "v": {"priority_id": ["3"]}}"#,
/// )
/// .unwrap();
/// assert_eq!(params.fields, vec!["priority_id"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
	#[serde(default, alias = "f")]
	pub fields: Vec<String>,
	#[serde(default, alias = "op")]
	pub operators: HashMap<String, String>,
	#[serde(default, alias = "v")]
	pub values: HashMap<String, serde_json::Value>,
}

impl FilterParams {
	/// Values submitted for a field; `None` when absent or null
	fn values_for(&self, field: &str) -> Result<Option<Vec<String>>> {
		let invalid = || FilterError::InvalidValueSet {
			field: field.to_string(),
		};

		match self.values.get(field) {
			None | Some(serde_json::Value::Null) => Ok(None),
			Some(serde_json::Value::Array(items)) => items
				.iter()
				.map(|item| match item {
					serde_json::Value::String(s) => Ok(s.clone()),
					serde_json::Value::Number(n) => Ok(n.to_string()),
					serde_json::Value::Bool(b) => Ok(b.to_string()),
					serde_json::Value::Null => Ok(String::new()),
					_ => Err(invalid()),
				})
				.collect::<Result<Vec<_>>>()
				.map(Some),
			Some(_) => Err(invalid()),
		}
	}
}
