//! Shared fixtures for watchfilter-core integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use rstest::fixture;
use watchfilter_core::prelude::*;
use watchfilter_query::{Condition, PostgresQueryBuilder, QueryBuilder};

/// A Thursday
pub fn today() -> NaiveDate {
	NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
}

pub fn strings(items: &[&str]) -> Vec<String> {
	items.iter().map(|item| item.to_string()).collect()
}

pub fn render(cond: &Condition) -> String {
	PostgresQueryBuilder::new().inline_condition(cond)
}

/// A project tree with people, catalog entries, a custom field and tags
///
/// ```text
/// 1 Main
/// ├── 2 Web
/// │   └── 4 Web Mobile
/// └── 3 Legacy (archived)
/// 5 Standalone
/// ```
#[fixture]
pub fn directory() -> InMemoryDirectory {
	InMemoryDirectory::new()
		.with_caller(Caller::User(7))
		.with_project(Project::new(1, "Main"))
		.with_project(Project::new(2, "Web").with_parent(1))
		.with_project(Project::new(4, "Web Mobile").with_parent(2))
		.with_project(Project::new(3, "Legacy").with_parent(1).archived())
		.with_project(Project::new(5, "Standalone"))
		.with_user(User::new(7, "Alice"), &[1, 5])
		.with_user(User::new(8, "Bob"), &[1])
		.with_group(Group {
			id: 20,
			name: "Developers".to_string(),
			user_ids: vec![8, 7],
		})
		.with_group(Group {
			id: 21,
			name: "Reviewers".to_string(),
			user_ids: vec![9, 7],
		})
		.with_role(Role {
			id: 3,
			name: "Manager".to_string(),
			member_ids: vec![8],
		})
		.with_status(CatalogEntry::new(1, "New"))
		.with_status(CatalogEntry::new(5, "Closed"))
		.with_tracker(CatalogEntry::new(1, "Bug"))
		.with_priority(CatalogEntry::new(3, "Normal"))
		.with_priority(CatalogEntry::new(5, "Urgent"))
		.with_category(1, CatalogEntry::new(4, "Backend"))
		.with_custom_field(CustomField {
			id: 2,
			name: "Severity".to_string(),
			format: CustomFieldFormat::List,
			is_filter: true,
			possible_values: strings(&["minor", "major"]),
		})
		.with_tag(Tag::new(1, "#release"), &[2])
		.with_tag(Tag::new(2, "backend"), &[1])
}

#[fixture]
pub fn settings() -> FilterSettings {
	FilterSettings::default()
}
