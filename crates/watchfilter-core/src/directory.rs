//! Collaborator interfaces
//!
//! The compiler never reaches into storage itself. Everything it needs
//! about projects, users, catalogs, custom fields and tags comes through
//! the traits in this module. [`crate::memory::InMemoryDirectory`] implements
//! all of them for tests and embedding.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ProjectId = i64;
pub type UserId = i64;
pub type GroupId = i64;
pub type RoleId = i64;
pub type TagId = i64;
pub type CustomFieldId = i64;

/// A project node of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
	pub id: ProjectId,
	pub name: String,
	#[serde(default)]
	pub parent_id: Option<ProjectId>,
	#[serde(default = "default_true")]
	pub active: bool,
	#[serde(default = "default_true")]
	pub visible: bool,
}

impl Project {
	pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			parent_id: None,
			active: true,
			visible: true,
		}
	}

	pub fn with_parent(mut self, parent_id: ProjectId) -> Self {
		self.parent_id = Some(parent_id);
		self
	}

	pub fn archived(mut self) -> Self {
		self.active = false;
		self
	}

	pub fn hidden(mut self) -> Self {
		self.visible = false;
		self
	}
}

fn default_true() -> bool {
	true
}

/// Who is asking for the compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Caller {
	Anonymous,
	User(UserId),
}

impl Caller {
	pub fn is_logged(&self) -> bool {
		matches!(self, Self::User(_))
	}

	pub fn user_id(&self) -> Option<UserId> {
		match self {
			Self::User(id) => Some(*id),
			Self::Anonymous => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub name: String,
}

impl User {
	pub fn new(id: UserId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}
}

/// A user group and its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
	pub id: GroupId,
	pub name: String,
	#[serde(default)]
	pub user_ids: Vec<UserId>,
}

/// A givable role and the users holding it through any membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
	pub id: RoleId,
	pub name: String,
	#[serde(default)]
	pub member_ids: Vec<UserId>,
}

/// A catalog entry with a display name (status, tracker, priority, category)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
	pub id: i64,
	pub name: String,
}

impl CatalogEntry {
	pub fn new(id: i64, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}
}

/// A version shared with a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
	pub id: i64,
	pub name: String,
	/// Name of the project owning the version
	pub project_name: String,
	#[serde(default)]
	pub effective_date: Option<NaiveDate>,
}

impl Version {
	/// Display order: dated versions first by date, then undated ones;
	/// ties are broken by name, then id.
	pub fn display_cmp(&self, other: &Self) -> Ordering {
		match (self.effective_date, other.effective_date) {
			(Some(a), Some(b)) if a != b => a.cmp(&b),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			_ => self
				.name
				.cmp(&other.name)
				.then_with(|| self.id.cmp(&other.id)),
		}
	}

	pub fn label(&self) -> String {
		format!("{} - {}", self.project_name, self.name)
	}
}

/// Storage format of a custom field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomFieldFormat {
	Text,
	List,
	Date,
	Bool,
	User,
	Version,
	String,
	Int,
	Float,
	#[serde(other)]
	Other,
}

/// An issue custom field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
	pub id: CustomFieldId,
	pub name: String,
	pub format: CustomFieldFormat,
	#[serde(default)]
	pub is_filter: bool,
	#[serde(default)]
	pub possible_values: Vec<String>,
}

/// A tag attached to issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
	pub id: TagId,
	pub name: String,
	#[serde(default)]
	pub last_used_on: Option<NaiveDate>,
}

impl Tag {
	pub fn new(id: TagId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			last_used_on: None,
		}
	}
}

/// Failure to record tag usage. Never fails a compilation.
#[derive(Debug, Error)]
#[error("Failed to mark tag usage: {message}")]
pub struct TagUsageError {
	pub message: String,
}

impl TagUsageError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

/// Project hierarchy provider
pub trait ProjectHierarchy {
	/// Look up a project
	fn project(&self, id: ProjectId) -> Option<Project>;

	/// All projects, in tree order where possible
	fn projects(&self) -> Vec<Project>;

	/// All descendants of a project, in tree order
	fn descendants(&self, id: ProjectId) -> Vec<Project> {
		fn collect(projects: &[Project], parent: ProjectId, out: &mut Vec<Project>) {
			for child in projects.iter().filter(|p| p.parent_id == Some(parent)) {
				out.push(child.clone());
				collect(projects, child.id, out);
			}
		}

		let projects = self.projects();
		let mut result = Vec::new();
		collect(&projects, id, &mut result);
		result
	}

	/// Active descendants of a project
	fn active_descendants(&self, id: ProjectId) -> Vec<Project> {
		self.descendants(id).into_iter().filter(|p| p.active).collect()
	}

	/// Descendants of a project visible to the caller
	fn visible_descendants(&self, id: ProjectId) -> Vec<Project> {
		self.descendants(id)
			.into_iter()
			.filter(|p| p.active && p.visible)
			.collect()
	}

	/// Whether a project has no children
	fn is_leaf(&self, id: ProjectId) -> bool {
		!self.projects().iter().any(|p| p.parent_id == Some(id))
	}

	/// Ancestors, the project itself and its descendants
	fn hierarchy(&self, id: ProjectId) -> Vec<Project> {
		let Some(project) = self.project(id) else {
			return Vec::new();
		};

		let mut ancestors = Vec::new();
		let mut parent = project.parent_id;
		while let Some(parent_id) = parent {
			match self.project(parent_id) {
				Some(p) => {
					parent = p.parent_id;
					ancestors.push(p);
				}
				None => break,
			}
		}
		ancestors.reverse();
		ancestors.push(project);
		ancestors.extend(self.descendants(id));
		ancestors
	}
}

/// User directory
pub trait UserDirectory {
	/// The user on whose behalf filters are compiled
	fn current_user(&self) -> Caller;

	/// Users that are members of a project
	fn project_users(&self, project_id: ProjectId) -> Vec<User>;

	/// All user groups
	fn groups(&self) -> Vec<Group>;

	/// Roles that can be given through memberships
	fn givable_roles(&self) -> Vec<Role>;
}

/// Issue catalogs
pub trait IssueCatalog {
	fn statuses(&self) -> Vec<CatalogEntry>;

	fn trackers(&self, project_id: ProjectId) -> Vec<CatalogEntry>;

	fn priorities(&self) -> Vec<CatalogEntry>;

	fn categories(&self, project_id: ProjectId) -> Vec<CatalogEntry>;

	fn shared_versions(&self, project_id: ProjectId) -> Vec<Version>;
}

/// Issue custom fields
pub trait CustomFieldDirectory {
	/// Custom fields enabled for issues of a project
	fn issue_custom_fields(&self, project_id: ProjectId) -> Vec<CustomField>;
}

/// Tag storage
pub trait TagDirectory {
	/// Tags used by issues of a project
	fn issue_tags_in_project(&self, project_id: ProjectId) -> Vec<Tag>;

	fn find_by_name(&self, name: &str) -> Option<Tag>;

	/// Record that tags were used on a date
	fn mark_used(&self, tag_ids: &[TagId], on: NaiveDate) -> Result<(), TagUsageError>;
}

/// Every collaborator in one bound
pub trait Directory:
	ProjectHierarchy + UserDirectory + IssueCatalog + CustomFieldDirectory + TagDirectory
{
}

impl<T> Directory for T where
	T: ProjectHierarchy + UserDirectory + IssueCatalog + CustomFieldDirectory + TagDirectory
{
}
