//! Group and role membership expansion
//!
//! `member_of_group` and `assigned_to_role` filter on who an issue is
//! assigned to. They are expanded into the member user ids of the selected
//! groups or roles and then compiled as an assignee filter.

use std::collections::BTreeSet;

use crate::directory::{UserDirectory, UserId};
use crate::field::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipKind {
	Group,
	Role,
}

impl MembershipKind {
	pub fn from_field(field: &str) -> Option<Self> {
		match field {
			"member_of_group" => Some(Self::Group),
			"assigned_to_role" => Some(Self::Role),
			_ => None,
		}
	}
}

/// An assignee filter derived from a membership filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeFilter {
	pub operator: Operator,
	pub user_ids: Vec<UserId>,
}

impl AssigneeFilter {
	/// User ids as filter values
	pub fn values(&self) -> Vec<String> {
		self.user_ids.iter().map(ToString::to_string).collect()
	}
}

/// Expands groups and roles into their members
pub struct MembershipExpander<'a> {
	users: &'a dyn UserDirectory,
}

impl<'a> MembershipExpander<'a> {
	pub fn new(users: &'a dyn UserDirectory) -> Self {
		Self { users }
	}

	/// Members of the groups or roles selected by `operator`.
	///
	/// `*` and `!*` select every group (or givable role); other operators
	/// select the ids in `selected`. The result is sorted and deduplicated.
	pub fn expand(&self, kind: MembershipKind, operator: Operator, selected: &[String]) -> Vec<UserId> {
		let everything = matches!(operator, Operator::Any | Operator::None);
		let selected: BTreeSet<i64> = selected
			.iter()
			.filter_map(|id| id.trim().parse().ok())
			.collect();
		let chosen = |id: i64| everything || selected.contains(&id);

		let members: BTreeSet<UserId> = match kind {
			MembershipKind::Group => self
				.users
				.groups()
				.into_iter()
				.filter(|g| chosen(g.id))
				.flat_map(|g| g.user_ids)
				.collect(),
			MembershipKind::Role => self
				.users
				.givable_roles()
				.into_iter()
				.filter(|r| chosen(r.id))
				.flat_map(|r| r.member_ids)
				.collect(),
		};
		members.into_iter().collect()
	}

	/// Expand and map the operator onto the assignee field
	pub fn assignee_filter(
		&self,
		kind: MembershipKind,
		operator: Operator,
		selected: &[String],
	) -> AssigneeFilter {
		AssigneeFilter {
			operator: assignee_operator(operator),
			user_ids: self.expand(kind, operator, selected),
		}
	}
}

/// `*` becomes `=` and `!*` becomes `!` over every member
pub fn assignee_operator(operator: Operator) -> Operator {
	match operator {
		Operator::Any => Operator::Equals,
		Operator::None => Operator::NotEquals,
		other => other,
	}
}
