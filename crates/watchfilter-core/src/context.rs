use chrono::{Local, NaiveDate, Weekday};

use crate::directory::{
	Caller, CustomFieldDirectory, Directory, IssueCatalog, ProjectHierarchy, ProjectId,
	TagDirectory, UserDirectory,
};
use crate::error::Result;
use crate::filter_set::FilterSet;
use crate::registry::FieldRegistry;
use crate::scope::ProjectScope;
use crate::settings::FilterSettings;
use crate::statement::StatementBuilder;
use watchfilter_query::Condition;

/// Collaborators, settings and the current date for one compilation
#[derive(Clone, Copy)]
pub struct FilterContext<'a> {
	pub projects: &'a dyn ProjectHierarchy,
	pub users: &'a dyn UserDirectory,
	pub catalog: &'a dyn IssueCatalog,
	pub custom_fields: &'a dyn CustomFieldDirectory,
	pub tags: &'a dyn TagDirectory,
	pub settings: &'a FilterSettings,
	pub today: NaiveDate,
}

impl<'a> FilterContext<'a> {
	/// Context over a single directory implementing every collaborator
	pub fn new<D: Directory>(directory: &'a D, settings: &'a FilterSettings) -> Self {
		Self {
			projects: directory,
			users: directory,
			catalog: directory,
			custom_fields: directory,
			tags: directory,
			settings,
			today: Local::now().date_naive(),
		}
	}

	/// Pin the current date
	pub fn with_today(mut self, today: NaiveDate) -> Self {
		self.today = today;
		self
	}

	pub fn caller(&self) -> Caller {
		self.users.current_user()
	}

	pub fn first_day_of_week(&self) -> Weekday {
		self.settings.first_day_of_week()
	}

	/// Build a fresh registry snapshot for a project
	pub fn build_registry(&self, project_id: ProjectId) -> Result<FieldRegistry> {
		FieldRegistry::build(self, project_id)
	}

	/// Compile a filter set under a project scope
	pub fn compile(&self, filters: &FilterSet, scope: &ProjectScope) -> Result<Option<Condition>> {
		StatementBuilder::new(*self).build(filters, scope)
	}
}

impl std::fmt::Debug for FilterContext<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FilterContext")
			.field("settings", self.settings)
			.field("today", &self.today)
			.finish_non_exhaustive()
	}
}
