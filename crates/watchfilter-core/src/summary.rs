//! Serializable registry summary
//!
//! Filter editors only need each field's type, label and options. The
//! summary serializes as a JSON object keyed by field:
//!
//! ```json
//! {"status_id": {"type": "status_list", "name": "Status", "values": [["New", "1"]]}}
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::field::{FieldType, FilterOption};
use crate::registry::FieldRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
	#[serde(rename = "type")]
	pub field_type: FieldType,
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub values: Option<Vec<FilterOption>>,
}

/// Summary of a registry in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RegistrySummary(IndexMap<String, FieldSummary>);

impl RegistrySummary {
	pub fn from_registry(registry: &FieldRegistry) -> Self {
		let fields = registry
			.sorted()
			.into_iter()
			.map(|field| {
				let values = field
					.field_type
					.has_values()
					.then(|| field.values.clone());
				let summary = FieldSummary {
					field_type: field.field_type,
					name: field.name.clone(),
					values,
				};
				(field.key.clone(), summary)
			})
			.collect();
		Self(fields)
	}

	pub fn get(&self, key: &str) -> Option<&FieldSummary> {
		self.0.get(key)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
		serde_json::to_value(self)
	}
}
