//! In-memory collaborators
//!
//! [`InMemoryDirectory`] implements every collaborator trait over plain
//! vectors and maps. It is used by the test suites and works for embedding
//! the compiler where the data is already loaded.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::directory::{
	Caller, CatalogEntry, CustomField, CustomFieldDirectory, Group, IssueCatalog, Project,
	ProjectHierarchy, ProjectId, Role, Tag, TagDirectory, TagId, TagUsageError, User,
	UserDirectory, Version,
};

/// Directory backed by in-memory collections
#[derive(Debug)]
pub struct InMemoryDirectory {
	caller: Caller,
	projects: Vec<Project>,
	users: Vec<User>,
	members: HashMap<ProjectId, Vec<i64>>,
	groups: Vec<Group>,
	roles: Vec<Role>,
	statuses: Vec<CatalogEntry>,
	trackers: Vec<CatalogEntry>,
	priorities: Vec<CatalogEntry>,
	categories: HashMap<ProjectId, Vec<CatalogEntry>>,
	versions: HashMap<ProjectId, Vec<Version>>,
	custom_fields: Vec<CustomField>,
	tags: RwLock<Vec<Tag>>,
	taggings: HashMap<ProjectId, Vec<TagId>>,
	fail_tag_usage: bool,
	tag_usage_calls: RwLock<usize>,
	tag_lookups: RwLock<Vec<String>>,
}

impl Default for InMemoryDirectory {
	fn default() -> Self {
		Self {
			caller: Caller::Anonymous,
			projects: Vec::new(),
			users: Vec::new(),
			members: HashMap::new(),
			groups: Vec::new(),
			roles: Vec::new(),
			statuses: Vec::new(),
			trackers: Vec::new(),
			priorities: Vec::new(),
			categories: HashMap::new(),
			versions: HashMap::new(),
			custom_fields: Vec::new(),
			tags: RwLock::new(Vec::new()),
			taggings: HashMap::new(),
			fail_tag_usage: false,
			tag_usage_calls: RwLock::new(0),
			tag_lookups: RwLock::new(Vec::new()),
		}
	}
}

impl InMemoryDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_caller(mut self, caller: Caller) -> Self {
		self.caller = caller;
		self
	}

	pub fn with_project(mut self, project: Project) -> Self {
		self.projects.push(project);
		self
	}

	/// Add a user as member of the given projects
	pub fn with_user(mut self, user: User, projects: &[ProjectId]) -> Self {
		for project_id in projects {
			self.members.entry(*project_id).or_default().push(user.id);
		}
		self.users.push(user);
		self
	}

	pub fn with_group(mut self, group: Group) -> Self {
		self.groups.push(group);
		self
	}

	pub fn with_role(mut self, role: Role) -> Self {
		self.roles.push(role);
		self
	}

	pub fn with_status(mut self, status: CatalogEntry) -> Self {
		self.statuses.push(status);
		self
	}

	pub fn with_tracker(mut self, tracker: CatalogEntry) -> Self {
		self.trackers.push(tracker);
		self
	}

	pub fn with_priority(mut self, priority: CatalogEntry) -> Self {
		self.priorities.push(priority);
		self
	}

	pub fn with_category(mut self, project_id: ProjectId, category: CatalogEntry) -> Self {
		self.categories.entry(project_id).or_default().push(category);
		self
	}

	pub fn with_version(mut self, project_id: ProjectId, version: Version) -> Self {
		self.versions.entry(project_id).or_default().push(version);
		self
	}

	pub fn with_custom_field(mut self, field: CustomField) -> Self {
		self.custom_fields.push(field);
		self
	}

	/// Add a tag used by issues of the given projects
	pub fn with_tag(mut self, tag: Tag, projects: &[ProjectId]) -> Self {
		for project_id in projects {
			self.taggings.entry(*project_id).or_default().push(tag.id);
		}
		self.tags.get_mut().push(tag);
		self
	}

	/// Make every `mark_used` call fail
	pub fn failing_tag_usage(mut self) -> Self {
		self.fail_tag_usage = true;
		self
	}

	/// Current state of a tag
	pub fn tag(&self, name: &str) -> Option<Tag> {
		self.tags.read().iter().find(|t| t.name == name).cloned()
	}

	/// Names passed to `find_by_name`, in call order
	pub fn tag_lookups(&self) -> Vec<String> {
		self.tag_lookups.read().clone()
	}

	/// Number of `mark_used` calls received so far
	pub fn tag_usage_calls(&self) -> usize {
		*self.tag_usage_calls.read()
	}
}

impl ProjectHierarchy for InMemoryDirectory {
	fn project(&self, id: ProjectId) -> Option<Project> {
		self.projects.iter().find(|p| p.id == id).cloned()
	}

	fn projects(&self) -> Vec<Project> {
		self.projects.clone()
	}
}

impl UserDirectory for InMemoryDirectory {
	fn current_user(&self) -> Caller {
		self.caller
	}

	fn project_users(&self, project_id: ProjectId) -> Vec<User> {
		let Some(ids) = self.members.get(&project_id) else {
			return Vec::new();
		};
		self.users
			.iter()
			.filter(|u| ids.contains(&u.id))
			.cloned()
			.collect()
	}

	fn groups(&self) -> Vec<Group> {
		self.groups.clone()
	}

	fn givable_roles(&self) -> Vec<Role> {
		self.roles.clone()
	}
}

impl IssueCatalog for InMemoryDirectory {
	fn statuses(&self) -> Vec<CatalogEntry> {
		self.statuses.clone()
	}

	fn trackers(&self, _project_id: ProjectId) -> Vec<CatalogEntry> {
		self.trackers.clone()
	}

	fn priorities(&self) -> Vec<CatalogEntry> {
		self.priorities.clone()
	}

	fn categories(&self, project_id: ProjectId) -> Vec<CatalogEntry> {
		self.categories.get(&project_id).cloned().unwrap_or_default()
	}

	fn shared_versions(&self, project_id: ProjectId) -> Vec<Version> {
		self.versions.get(&project_id).cloned().unwrap_or_default()
	}
}

impl CustomFieldDirectory for InMemoryDirectory {
	fn issue_custom_fields(&self, _project_id: ProjectId) -> Vec<CustomField> {
		self.custom_fields.clone()
	}
}

impl TagDirectory for InMemoryDirectory {
	fn issue_tags_in_project(&self, project_id: ProjectId) -> Vec<Tag> {
		let Some(ids) = self.taggings.get(&project_id) else {
			return Vec::new();
		};
		self.tags
			.read()
			.iter()
			.filter(|t| ids.contains(&t.id))
			.cloned()
			.collect()
	}

	fn find_by_name(&self, name: &str) -> Option<Tag> {
		self.tag_lookups.write().push(name.to_string());
		self.tag(name)
	}

	fn mark_used(&self, tag_ids: &[TagId], on: NaiveDate) -> Result<(), TagUsageError> {
		*self.tag_usage_calls.write() += 1;
		if self.fail_tag_usage {
			return Err(TagUsageError::new("tag store is read-only"));
		}

		for tag in self.tags.write().iter_mut() {
			if tag_ids.contains(&tag.id) {
				tag.last_used_on = Some(on);
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn tree() -> InMemoryDirectory {
		InMemoryDirectory::new()
			.with_project(Project::new(1, "Root"))
			.with_project(Project::new(2, "Child").with_parent(1))
			.with_project(Project::new(3, "Grandchild").with_parent(2).archived())
			.with_project(Project::new(4, "Sibling").with_parent(1).hidden())
	}

	#[rstest]
	fn test_descendants_in_tree_order() {
		let dir = tree();
		let ids: Vec<_> = dir.descendants(1).iter().map(|p| p.id).collect();
		assert_eq!(ids, vec![2, 3, 4]);
	}

	#[rstest]
	fn test_active_and_visible_descendants() {
		let dir = tree();
		let active: Vec<_> = dir.active_descendants(1).iter().map(|p| p.id).collect();
		let visible: Vec<_> = dir.visible_descendants(1).iter().map(|p| p.id).collect();
		assert_eq!(active, vec![2, 4]);
		assert_eq!(visible, vec![2]);
	}

	#[rstest]
	fn test_hierarchy_and_leaf() {
		let dir = tree();
		let ids: Vec<_> = dir.hierarchy(2).iter().map(|p| p.id).collect();
		assert_eq!(ids, vec![1, 2, 3]);
		assert!(dir.is_leaf(3));
		assert!(!dir.is_leaf(1));
		assert!(dir.hierarchy(99).is_empty());
	}

	#[rstest]
	fn test_mark_used_updates_tags() {
		let dir = InMemoryDirectory::new()
			.with_tag(Tag::new(1, "backend"), &[1])
			.with_tag(Tag::new(2, "frontend"), &[1]);
		let today = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();

		dir.mark_used(&[1], today).unwrap();

		assert_eq!(dir.tag("backend").unwrap().last_used_on, Some(today));
		assert_eq!(dir.tag("frontend").unwrap().last_used_on, None);
		assert_eq!(dir.tag_usage_calls(), 1);
	}

	#[rstest]
	fn test_failing_tag_usage() {
		let dir = InMemoryDirectory::new()
			.with_tag(Tag::new(1, "backend"), &[1])
			.failing_tag_usage();
		let today = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();

		assert!(dir.mark_used(&[1], today).is_err());
		assert_eq!(dir.tag("backend").unwrap().last_used_on, None);
	}
}
