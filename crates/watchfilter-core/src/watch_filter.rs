//! Saved watch filters
//!
//! A [`WatchFilter`] is the persisted record: a name, the project it applies
//! to, the group it belongs to and its [`FilterSet`]. Persistence itself is
//! left to the caller; the record serializes with serde.

use serde::{Deserialize, Serialize};
use tracing::error;
use watchfilter_query::Condition;

use crate::context::FilterContext;
use crate::directory::{GroupId, ProjectId};
use crate::error::{FieldError, FieldErrorKind, FilterError, Result};
use crate::filter_set::FilterSet;
use crate::registry::FieldRegistry;
use crate::scope::ProjectScope;
use crate::statement::StatementBuilder;
use crate::store::{IssueStore, QueryOptions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchFilter {
	#[serde(default)]
	pub id: Option<i64>,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub project_id: Option<ProjectId>,
	#[serde(default)]
	pub group_id: Option<GroupId>,
	#[serde(default)]
	pub filters: FilterSet,
}

impl WatchFilter {
	/// A new filter on open issues of a project
	pub fn new(name: impl Into<String>, project_id: ProjectId, group_id: GroupId) -> Self {
		Self {
			id: None,
			name: name.into(),
			project_id: Some(project_id),
			group_id: Some(group_id),
			filters: FilterSet::new(),
		}
	}

	/// Presence checks on the record's attributes
	pub fn validate(&self) -> std::result::Result<(), Vec<FieldError>> {
		let mut errors = Vec::new();
		if self.name.trim().is_empty() {
			errors.push(FieldError::new("name", FieldErrorKind::Blank));
		}
		if self.project_id.is_none() {
			errors.push(FieldError::new("project_id", FieldErrorKind::Blank));
		}
		if self.group_id.is_none() {
			errors.push(FieldError::new("group_id", FieldErrorKind::Blank));
		}

		if errors.is_empty() {
			Ok(())
		} else {
			Err(errors)
		}
	}

	/// Attribute checks plus filter entry checks against a registry
	pub fn validate_with(&self, registry: &FieldRegistry) -> std::result::Result<(), Vec<FieldError>> {
		let mut errors = self.validate().err().unwrap_or_default();
		if let Err(entry_errors) = self.filters.validate(registry) {
			errors.extend(entry_errors);
		}

		if errors.is_empty() {
			Ok(())
		} else {
			Err(errors)
		}
	}

	/// Scope of the filter's project
	pub fn scope(&self, ctx: &FilterContext<'_>) -> Option<ProjectScope> {
		self.project_id
			.map(|project_id| ProjectScope::from_filters(project_id, &self.filters, ctx.settings))
	}

	/// Validate the record and build its predicate
	pub fn statement(&self, ctx: &FilterContext<'_>) -> Result<Option<Condition>> {
		self.validate().map_err(FilterError::Validation)?;

		let Some(scope) = self.scope(ctx) else {
			return Err(FilterError::Validation(vec![FieldError::new(
				"project_id",
				FieldErrorKind::Blank,
			)]));
		};
		StatementBuilder::new(*ctx).build(&self.filters, &scope)
	}

	/// Run the filter against a store
	pub fn issues<S>(
		&self,
		ctx: &FilterContext<'_>,
		store: &S,
		options: QueryOptions,
	) -> Result<Vec<S::Record>>
	where
		S: IssueStore + ?Sized,
	{
		let statement = self.statement(ctx)?;
		store.execute(statement.as_ref(), options).map_err(|err| {
			error!(filter = ?self.id, error = %err, "Issue store rejected filter statement");
			FilterError::StatementInvalid(err)
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::directory::{CatalogEntry, Project};
	use crate::field::Operator;
	use crate::filter_set::FilterEntry;
	use crate::memory::InMemoryDirectory;
	use crate::settings::FilterSettings;
	use crate::store::StoreExecutionError;
	use parking_lot::Mutex;
	use rstest::rstest;
	use watchfilter_query::{PostgresQueryBuilder, QueryBuilder};

	struct RecordingStore {
		statements: Mutex<Vec<String>>,
		reject: bool,
	}

	impl RecordingStore {
		fn new(reject: bool) -> Self {
			Self {
				statements: Mutex::new(Vec::new()),
				reject,
			}
		}
	}

	impl IssueStore for RecordingStore {
		type Record = i64;

		fn execute(
			&self,
			predicate: Option<&Condition>,
			options: QueryOptions,
		) -> std::result::Result<Vec<i64>, StoreExecutionError> {
			if self.reject {
				return Err(StoreExecutionError::new("expression too long"));
			}
			let sql = predicate
				.map(|cond| PostgresQueryBuilder::new().inline_condition(cond))
				.unwrap_or_default();
			self.statements.lock().push(sql);
			Ok((1..=3).take(options.limit.unwrap_or(usize::MAX)).collect())
		}
	}

	fn directory() -> InMemoryDirectory {
		InMemoryDirectory::new()
			.with_project(Project::new(1, "Main"))
			.with_status(CatalogEntry::new(1, "New"))
	}

	#[rstest]
	fn test_new_record_is_valid() {
		let filter = WatchFilter::new("Open work", 1, 5);
		assert!(filter.validate().is_ok());
		assert_eq!(filter.filters.operator_for("status_id"), Some(Operator::Open));
	}

	#[rstest]
	fn test_missing_attributes() {
		let filter = WatchFilter {
			id: None,
			name: " ".to_string(),
			project_id: None,
			group_id: None,
			filters: FilterSet::new(),
		};
		let errors = filter.validate().unwrap_err();
		let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
		assert_eq!(fields, vec!["name", "project_id", "group_id"]);

		let dir = directory();
		let settings = FilterSettings::default();
		let ctx = FilterContext::new(&dir, &settings);
		assert!(matches!(filter.statement(&ctx), Err(FilterError::Validation(_))));
	}

	#[rstest]
	fn test_validate_with_reports_unknown_fields() {
		let dir = directory();
		let settings = FilterSettings::default();
		let ctx = FilterContext::new(&dir, &settings);
		let registry = ctx.build_registry(1).unwrap();

		let mut filter = WatchFilter::new("Mine", 1, 5);
		filter
			.filters
			.insert("bogus_field", FilterEntry::new(Operator::Equals, ["1"]));

		let errors = filter.validate_with(&registry).unwrap_err();
		assert_eq!(
			errors,
			vec![FieldError::new("bogus_field", FieldErrorKind::UnknownField)]
		);
		assert!(filter.statement(&ctx).is_ok());
	}

	#[rstest]
	fn test_issues_runs_statement() {
		let dir = directory();
		let settings = FilterSettings::default();
		let ctx = FilterContext::new(&dir, &settings);
		let store = RecordingStore::new(false);

		let filter = WatchFilter::new("Open work", 1, 5);
		let issues = filter
			.issues(&ctx, &store, QueryOptions::new().limit(2))
			.unwrap();

		assert_eq!(issues, vec![1, 2]);
		assert_eq!(
			store.statements.lock().as_slice(),
			&[r#""issue_statuses"."is_closed" = FALSE AND "projects"."id" = 1"#.to_string()]
		);
	}

	#[rstest]
	fn test_store_rejection_is_statement_invalid() {
		let dir = directory();
		let settings = FilterSettings::default();
		let ctx = FilterContext::new(&dir, &settings);
		let store = RecordingStore::new(true);

		let result = WatchFilter::new("Open work", 1, 5).issues(&ctx, &store, QueryOptions::new());
		assert!(matches!(
			result,
			Err(FilterError::StatementInvalid(ref err)) if err.message == "expression too long"
		));
	}

	#[rstest]
	fn test_serde_shape() {
		let filter = WatchFilter::new("Open work", 1, 5);
		let json = serde_json::to_value(&filter).unwrap();
		assert_eq!(json["filters"]["status_id"]["operator"], "o");

		let back: WatchFilter = serde_json::from_value(json).unwrap();
		assert_eq!(back, filter);
	}
}
