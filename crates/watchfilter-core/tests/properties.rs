//! Property-based tests for the predicate compiler
//!
//! # Properties Tested
//!
//! - `=` with no values never matches, `!` with no values always matches
//! - `t-N` resolves to a single day N days back
//! - Expanding every group is stable across calls

mod common;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use proptest::prelude::*;
use watchfilter_core::prelude::*;
use watchfilter_core::{
	DateWindowResolver, FieldPath, MembershipExpander, MembershipKind, PredicateCompiler,
};
use watchfilter_query::{Cond, PostgresQueryBuilder, QueryBuilder};

// =============================================================================
// Strategy Definitions
// =============================================================================

/// Plain column keys compiled against `issues`
fn column_key_strategy() -> impl Strategy<Value = String> {
	prop::string::string_regex("[a-z][a-z_]{0,15}_id")
		.expect("Valid regex for column key")
		.prop_filter("column keys only", |key| FieldPath::classify(key) == FieldPath::Regular)
}

fn list_type_strategy() -> impl Strategy<Value = FieldType> {
	prop_oneof![
		Just(FieldType::List),
		Just(FieldType::ListOptional),
		Just(FieldType::StatusList),
		Just(FieldType::String),
		Just(FieldType::Text),
		Just(FieldType::Integer),
	]
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
	(1990i32..2100, 1u32..=12, 1u32..=28)
		.prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("Valid calendar date"))
}

fn weekday_strategy() -> impl Strategy<Value = Weekday> {
	(0u8..7).prop_map(|n| Weekday::try_from(n).expect("Valid weekday index"))
}

fn groups_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
	prop::collection::vec(prop::collection::vec(1i64..50, 0..8), 0..6)
}

fn compile_empty(key: &str, field_type: FieldType, operator: Operator) -> String {
	let dir = InMemoryDirectory::new().with_project(Project::new(1, "Main"));
	let settings = FilterSettings::default();
	let ctx = FilterContext::new(&dir, &settings).with_today(common::today());
	let field = FieldDefinition::new(key, field_type, 1, key);

	let fragment = PredicateCompiler::new(&ctx)
		.compile(&field, operator, &[])
		.expect("Operator should be supported")
		.expect("Column fields always produce a fragment");
	PostgresQueryBuilder::new().inline_condition(&Cond::all().add(fragment))
}

// =============================================================================
// Property Tests - Empty Value Sets
// =============================================================================

proptest! {
	/// Property: `=` over no values is the always-false constant
	#[test]
	fn test_equals_nothing_never_matches(
		key in column_key_strategy(),
		field_type in list_type_strategy(),
	) {
		prop_assume!(field_type.supports(Operator::Equals));
		prop_assert_eq!(compile_empty(&key, field_type, Operator::Equals), "1 = 0");
	}

	/// Property: `!` over no values is the always-true constant
	#[test]
	fn test_not_equals_nothing_always_matches(
		key in column_key_strategy(),
		field_type in list_type_strategy(),
	) {
		prop_assume!(field_type.supports(Operator::NotEquals));
		prop_assert_eq!(compile_empty(&key, field_type, Operator::NotEquals), "1 = 1");
	}

	/// Property: a custom field's side-table match is constant too
	#[test]
	fn test_custom_field_equals_nothing(id in 1i64..10_000) {
		let sql = compile_empty(&format!("cf_{id}"), FieldType::ListOptional, Operator::Equals);
		prop_assert!(sql.ends_with("WHERE 1 = 0)"), "unexpected statement: {}", sql);
	}
}

// =============================================================================
// Property Tests - Date Windows
// =============================================================================

proptest! {
	/// Property: `t-N` is exactly the day N days before today
	#[test]
	fn test_days_ago_is_a_single_day(
		today in date_strategy(),
		first_day in weekday_strategy(),
		days in 0i64..20_000,
	) {
		let resolver = DateWindowResolver::new(today, first_day);

		let window = resolver.for_operator(Operator::DaysAgo, days).expect("t- always resolves");

		let expected = today.checked_sub_days(Days::new(days as u64));
		prop_assert_eq!(window.from, expected);
		prop_assert_eq!(window.to, expected);
	}

	/// Property: the current week is seven days starting on the first weekday
	#[test]
	fn test_this_week_starts_on_first_day(
		today in date_strategy(),
		first_day in weekday_strategy(),
	) {
		let resolver = DateWindowResolver::new(today, first_day);

		let window = resolver.for_operator(Operator::ThisWeek, 0).expect("w always resolves");
		let (from, to) = (window.from.unwrap(), window.to.unwrap());

		prop_assert_eq!(from.weekday(), first_day);
		prop_assert_eq!((to - from).num_days(), 6);
		prop_assert!(window.contains(today));
	}
}

// =============================================================================
// Property Tests - Membership Expansion
// =============================================================================

proptest! {
	/// Property: expanding every group twice yields the same sorted id set
	#[test]
	fn test_group_expansion_is_idempotent(groups in groups_strategy()) {
		let dir = groups
			.iter()
			.enumerate()
			.fold(InMemoryDirectory::new(), |dir, (index, members)| {
				dir.with_group(Group {
					id: index as i64 + 1,
					name: format!("Group {index}"),
					user_ids: members.clone(),
				})
			});
		let expander = MembershipExpander::new(&dir);

		let first = expander.expand(MembershipKind::Group, Operator::Any, &[]);
		let second = expander.expand(MembershipKind::Group, Operator::Any, &[]);

		prop_assert_eq!(&first, &second);
		prop_assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
		let mut expected: Vec<i64> = groups.into_iter().flatten().collect();
		expected.sort_unstable();
		expected.dedup();
		prop_assert_eq!(first, expected);
	}
}
