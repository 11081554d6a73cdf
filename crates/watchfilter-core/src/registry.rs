//! Field registry
//!
//! A [`FieldRegistry`] is an immutable snapshot of the fields that can be
//! filtered for one project: their type, display order and selectable
//! values. It is rebuilt from the collaborators for every compilation.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::context::FilterContext;
use crate::directory::{
	CatalogEntry, CustomField, CustomFieldFormat, Project, ProjectHierarchy, ProjectId, User,
};
use crate::error::{FilterError, Result};
use crate::field::{FieldDefinition, FieldType, FilterOption};
use crate::summary::RegistrySummary;

/// Value standing for the caller's own user id
pub const ME: &str = "me";

const ME_LABEL: &str = "<< me >>";

/// Order shared by every custom field
const CUSTOM_FIELD_ORDER: u32 = 20;
const TAGS_ORDER: u32 = 21;

/// Filterable fields of one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegistry {
	project_id: ProjectId,
	fields: IndexMap<String, FieldDefinition>,
}

impl FieldRegistry {
	/// Build the registry of a project.
	///
	/// The base fields are always present. Assignee, author, watcher,
	/// group, role, category, version, subproject and tag fields are only
	/// added when they have values to offer.
	pub fn build(ctx: &FilterContext<'_>, project_id: ProjectId) -> Result<Self> {
		let project = ctx
			.projects
			.project(project_id)
			.ok_or(FilterError::ProjectNotFound(project_id))?;

		let mut registry = Self {
			project_id,
			fields: IndexMap::new(),
		};

		registry.add_base_fields(ctx, &project);
		registry.add_people_fields(ctx, &project);
		registry.add_project_fields(ctx, &project);

		for field in ctx.custom_fields.issue_custom_fields(project.id) {
			if field.is_filter {
				registry.insert(custom_field_definition(ctx, &project, &field));
			}
		}

		let tags = tag_values(ctx, &project);
		if !tags.is_empty() {
			registry.insert(
				FieldDefinition::new("tags", FieldType::TagList, TAGS_ORDER, "Tags").with_values(tags),
			);
		}

		debug!(project_id, fields = registry.len(), "Built filter registry");
		Ok(registry)
	}

	fn add_base_fields(&mut self, ctx: &FilterContext<'_>, project: &Project) {
		self.insert(
			FieldDefinition::new("status_id", FieldType::StatusList, 1, "Status")
				.with_values(entry_options(ctx.catalog.statuses())),
		);
		self.insert(
			FieldDefinition::new("tracker_id", FieldType::List, 2, "Tracker")
				.with_values(entry_options(ctx.catalog.trackers(project.id))),
		);
		self.insert(
			FieldDefinition::new("priority_id", FieldType::List, 3, "Priority")
				.with_values(entry_options(ctx.catalog.priorities())),
		);
		self.insert(FieldDefinition::new("subject", FieldType::Text, 8, "Subject"));
		self.insert(FieldDefinition::new("created_on", FieldType::DatePast, 9, "Created"));
		self.insert(FieldDefinition::new("updated_on", FieldType::DatePast, 10, "Updated"));
		self.insert(FieldDefinition::new("start_date", FieldType::Date, 11, "Start date"));
		self.insert(FieldDefinition::new("due_date", FieldType::Date, 12, "Due date"));
		self.insert(FieldDefinition::new("estimated_hours", FieldType::Integer, 13, "Estimated time"));
		self.insert(FieldDefinition::new("done_ratio", FieldType::Integer, 14, "% Done"));
	}

	fn add_people_fields(&mut self, ctx: &FilterContext<'_>, project: &Project) {
		let logged = ctx.caller().is_logged();

		let mut user_values = Vec::new();
		if logged {
			user_values.push(FilterOption::new(ME_LABEL, ME));
		}
		user_values.extend(user_options(ctx.users.project_users(project.id)));

		if !user_values.is_empty() {
			self.insert(
				FieldDefinition::new("assigned_to_id", FieldType::ListOptional, 4, "Assignee")
					.with_values(user_values.clone()),
			);
			self.insert(
				FieldDefinition::new("author_id", FieldType::List, 5, "Author")
					.with_values(user_values),
			);
		}

		let groups: Vec<FilterOption> = ctx
			.users
			.groups()
			.into_iter()
			.map(|g| FilterOption::new(g.name, g.id.to_string()))
			.collect();
		if !groups.is_empty() {
			self.insert(
				FieldDefinition::new("member_of_group", FieldType::ListOptional, 6, "Assignee's group")
					.with_values(groups),
			);
		}

		let roles: Vec<FilterOption> = ctx
			.users
			.givable_roles()
			.into_iter()
			.map(|r| FilterOption::new(r.name, r.id.to_string()))
			.collect();
		if !roles.is_empty() {
			self.insert(
				FieldDefinition::new("assigned_to_role", FieldType::ListOptional, 7, "Assignee's role")
					.with_values(roles),
			);
		}

		// Anonymous callers keep it; their "me" becomes the sentinel user id.
		self.insert(
			FieldDefinition::new("watcher_id", FieldType::List, 15, "Watcher")
				.with_values(vec![FilterOption::new(ME_LABEL, ME)]),
		);
	}

	fn add_project_fields(&mut self, ctx: &FilterContext<'_>, project: &Project) {
		let categories = entry_options(ctx.catalog.categories(project.id));
		if !categories.is_empty() {
			self.insert(
				FieldDefinition::new("category_id", FieldType::ListOptional, 6, "Category")
					.with_values(categories),
			);
		}

		let mut versions = ctx.catalog.shared_versions(project.id);
		versions.sort_by(|a, b| a.display_cmp(b));
		if !versions.is_empty() {
			let values = versions
				.iter()
				.map(|v| FilterOption::new(v.label(), v.id.to_string()))
				.collect();
			self.insert(
				FieldDefinition::new("fixed_version_id", FieldType::ListOptional, 7, "Target version")
					.with_values(values),
			);
		}

		if !ctx.projects.is_leaf(project.id) {
			let subprojects: Vec<FilterOption> = ctx
				.projects
				.visible_descendants(project.id)
				.into_iter()
				.map(|p| FilterOption::new(p.name, p.id.to_string()))
				.collect();
			if !subprojects.is_empty() {
				self.insert(
					FieldDefinition::new("subproject_id", FieldType::SubprojectList, 13, "Subproject")
						.with_values(subprojects),
				);
			}
		}
	}

	fn insert(&mut self, definition: FieldDefinition) {
		self.fields.insert(definition.key.clone(), definition);
	}

	pub fn project_id(&self) -> ProjectId {
		self.project_id
	}

	pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
		self.fields.get(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.fields.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Fields in registration order
	pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
		self.fields.values()
	}

	/// Fields in display order
	pub fn sorted(&self) -> Vec<&FieldDefinition> {
		let mut fields: Vec<_> = self.fields.values().collect();
		fields.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.key.cmp(&b.key)));
		fields
	}

	/// Display label of a field.
	///
	/// Unknown fields fall back to the key without its `_id` suffix.
	pub fn label_for(&self, key: &str) -> String {
		match self.fields.get(key) {
			Some(field) => field.name.clone(),
			None => key.strip_suffix("_id").unwrap_or(key).to_string(),
		}
	}

	/// Serializable summary for filter editors
	pub fn summary(&self) -> RegistrySummary {
		RegistrySummary::from_registry(self)
	}
}

fn entry_options(entries: Vec<CatalogEntry>) -> Vec<FilterOption> {
	entries
		.into_iter()
		.map(|e| FilterOption::new(e.name, e.id.to_string()))
		.collect()
}

fn user_options(mut users: Vec<User>) -> Vec<FilterOption> {
	users.sort_by_cached_key(|u| u.name.to_lowercase());
	users
		.into_iter()
		.map(|u| FilterOption::new(u.name, u.id.to_string()))
		.collect()
}

fn custom_field_definition(
	ctx: &FilterContext<'_>,
	project: &Project,
	field: &CustomField,
) -> FieldDefinition {
	let key = format!("cf_{}", field.id);
	let definition = |field_type| {
		FieldDefinition::new(key.clone(), field_type, CUSTOM_FIELD_ORDER, field.name.clone())
	};

	match field.format {
		CustomFieldFormat::Text => definition(FieldType::Text),
		CustomFieldFormat::List => definition(FieldType::ListOptional).with_values(
			field
				.possible_values
				.iter()
				.map(|v| FilterOption::new(v.clone(), v.clone()))
				.collect(),
		),
		CustomFieldFormat::Date => definition(FieldType::Date),
		CustomFieldFormat::Bool => definition(FieldType::List)
			.with_values(vec![FilterOption::new("Yes", "1"), FilterOption::new("No", "0")]),
		CustomFieldFormat::User => definition(FieldType::ListOptional)
			.with_values(user_options(ctx.users.project_users(project.id))),
		CustomFieldFormat::Version => {
			let mut versions = ctx.catalog.shared_versions(project.id);
			versions.sort_by(|a, b| a.display_cmp(b));
			definition(FieldType::ListOptional).with_values(
				versions
					.into_iter()
					.map(|v| FilterOption::new(v.name, v.id.to_string()))
					.collect(),
			)
		}
		CustomFieldFormat::String
		| CustomFieldFormat::Int
		| CustomFieldFormat::Float
		| CustomFieldFormat::Other => definition(FieldType::String),
	}
}

/// Tags used anywhere in the project's hierarchy, sorted and deduplicated
fn tag_values(ctx: &FilterContext<'_>, project: &Project) -> Vec<FilterOption> {
	let mut projects = ctx.projects.hierarchy(project.id);
	if projects.is_empty() {
		projects.push(project.clone());
	}

	let values: BTreeSet<FilterOption> = projects
		.iter()
		.flat_map(|p| ctx.tags.issue_tags_in_project(p.id))
		.map(|tag| {
			let label = tag.name.strip_prefix('#').unwrap_or(&tag.name).to_string();
			FilterOption::new(label, tag.name)
		})
		.collect();
	values.into_iter().collect()
}

/// Every project as `(label, id)` pairs in tree order.
///
/// Labels are indented with `--` per nesting level.
pub fn all_projects_values(projects: &dyn ProjectHierarchy) -> Vec<FilterOption> {
	let all: Vec<Project> = projects
		.projects()
		.into_iter()
		.filter(|p| p.active && p.visible)
		.collect();

	fn walk(all: &[Project], parent: ProjectId, level: usize, out: &mut Vec<FilterOption>) {
		for project in all.iter().filter(|p| p.parent_id == Some(parent)) {
			out.push(FilterOption::new(
				format!("{} {}", "--".repeat(level), project.name),
				project.id.to_string(),
			));
			walk(all, project.id, level + 1, out);
		}
	}

	let mut values = Vec::new();
	let roots = all
		.iter()
		.filter(|p| p.parent_id.is_none_or(|parent| !all.iter().any(|q| q.id == parent)));
	for root in roots {
		values.push(FilterOption::new(root.name.clone(), root.id.to_string()));
		walk(&all, root.id, 1, &mut values);
	}
	values
}
