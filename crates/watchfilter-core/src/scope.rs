//! Project scope
//!
//! Which projects' issues a filter covers: the anchor project plus,
//! depending on the policy, none, some or all of its descendants.

use serde::{Deserialize, Serialize};
use watchfilter_query::{Expr, ExprTrait, SimpleExpr};

use crate::directory::{ProjectHierarchy, ProjectId};
use crate::field::Operator;
use crate::filter_set::FilterSet;
use crate::schema::PROJECTS;
use crate::settings::FilterSettings;

/// Descendants included next to the anchor project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubprojectPolicy {
	All,
	SelfOnly,
	Selected(Vec<ProjectId>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectScope {
	pub project_id: ProjectId,
	pub policy: SubprojectPolicy,
}

impl ProjectScope {
	pub fn new(project_id: ProjectId, policy: SubprojectPolicy) -> Self {
		Self { project_id, policy }
	}

	/// Derive the scope from the `subproject_id` entry, or from the
	/// `display_subprojects_issues` setting when there is none.
	///
	/// `=` keeps the selected ids, `!*` keeps the project alone and any
	/// other operator keeps every descendant. Non-numeric ids are dropped.
	pub fn from_filters(project_id: ProjectId, filters: &FilterSet, settings: &FilterSettings) -> Self {
		let policy = match filters.get("subproject_id") {
			Some(entry) => match entry.operator {
				Operator::Equals => SubprojectPolicy::Selected(
					entry
						.values
						.iter()
						.filter_map(|id| id.trim().parse().ok())
						.collect(),
				),
				Operator::None => SubprojectPolicy::SelfOnly,
				_ => SubprojectPolicy::All,
			},
			None if settings.display_subprojects_issues => SubprojectPolicy::All,
			None => SubprojectPolicy::SelfOnly,
		};
		Self::new(project_id, policy)
	}

	/// Projects whose issues are included.
	///
	/// Selected ids that are not descendants of the anchor are ignored.
	pub fn project_ids(&self, projects: &dyn ProjectHierarchy) -> Vec<ProjectId> {
		let mut ids = vec![self.project_id];
		match &self.policy {
			SubprojectPolicy::All => {
				ids.extend(projects.descendants(self.project_id).iter().map(|p| p.id));
			}
			SubprojectPolicy::Selected(selected) => {
				let descendants: Vec<ProjectId> =
					projects.descendants(self.project_id).iter().map(|p| p.id).collect();
				ids.extend(selected.iter().copied().filter(|id| descendants.contains(id)));
			}
			SubprojectPolicy::SelfOnly => {}
		}
		ids
	}

	/// Scope fragment: `projects.id IN (...)` when the project has active
	/// descendants, `projects.id = P` otherwise
	pub fn fragment(&self, projects: &dyn ProjectHierarchy) -> SimpleExpr {
		if projects.active_descendants(self.project_id).is_empty() {
			Expr::tbl(PROJECTS, "id").eq(self.project_id)
		} else {
			Expr::tbl(PROJECTS, "id").is_in(self.project_ids(projects))
		}
	}
}
