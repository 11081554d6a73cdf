//! Predicate compiler
//!
//! Turns one field, operator and value list into a predicate fragment.
//! Most fields compare an `issues` column directly. Custom fields, watchers
//! and tags live in side tables and compile to correlated sub-selects on
//! `issues.id`; group and role filters are expanded into assignee ids first.
//!
//! # Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use watchfilter_core::compiler::PredicateCompiler;
//! use watchfilter_core::context::FilterContext;
//! use watchfilter_core::directory::Project;
//! use watchfilter_core::field::{FieldDefinition, FieldType, Operator};
//! use watchfilter_core::memory::InMemoryDirectory;
//! use watchfilter_core::settings::FilterSettings;
//! use watchfilter_query::prelude::*;
//!
//! let dir = InMemoryDirectory::new().with_project(Project::new(1, "Main"));
//! let settings = FilterSettings::default();
//! let ctx = FilterContext::new(&dir, &settings)
//!     .with_today(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
//!
//! let field = FieldDefinition::new("priority_id", FieldType::List, 3, "Priority");
//! let values = vec!["3".to_string(), "5".to_string()];
//! let fragment = PredicateCompiler::new(&ctx)
//!     .compile(&field, Operator::Equals, &values)
//!     .unwrap()
//!     .unwrap();
//!
//! let sql = PostgresQueryBuilder::new().inline_condition(&Cond::all().add(fragment));
//! assert_eq!(sql, r#""issues"."priority_id" IN ('3', '5')"#);
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;
use watchfilter_query::{ColumnRef, Cond, Expr, ExprTrait, Query, SelectStatement, SimpleExpr};

use crate::context::FilterContext;
use crate::date_window::{DateWindow, DateWindowResolver};
use crate::directory::{Caller, CustomFieldId, TagDirectory, UserDirectory};
use crate::error::{FilterError, Result};
use crate::field::{FieldDefinition, FieldType, Operator};
use crate::membership::{MembershipExpander, MembershipKind};
use crate::registry::ME;
use crate::schema::{
	CUSTOM_VALUES, ISSUE_STATUSES, ISSUE_TYPE, ISSUES, TAGGINGS, TAGS, WATCHERS,
};

/// Fields whose values may contain "me"
const ME_FIELDS: &[&str] = &["assigned_to_id", "author_id", "watcher_id"];

/// How a field key is compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
	/// Direct comparison on an `issues` column
	Regular,
	/// `cf_<id>`, through `custom_values`
	Custom(CustomFieldId),
	/// `watcher_id`, through `watchers`
	Watcher,
	/// `member_of_group` or `assigned_to_role`, expanded to assignees
	Membership(MembershipKind),
	/// `tags`, through `taggings`
	Tags,
	/// `subproject_id`, only drives the project scope
	Subprojects,
}

impl FieldPath {
	pub fn classify(key: &str) -> Self {
		if let Some(kind) = MembershipKind::from_field(key) {
			return Self::Membership(kind);
		}
		match key {
			"watcher_id" => Self::Watcher,
			"tags" => Self::Tags,
			"subproject_id" => Self::Subprojects,
			_ => match custom_field_id(key) {
				Some(id) => Self::Custom(id),
				None => Self::Regular,
			},
		}
	}
}

fn custom_field_id(key: &str) -> Option<CustomFieldId> {
	let digits = key.strip_prefix("cf_")?;
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	digits.parse().ok()
}

/// Compiles filter entries into predicate fragments
pub struct PredicateCompiler<'a> {
	dates: DateWindowResolver,
	users: &'a dyn UserDirectory,
	tags: &'a dyn TagDirectory,
	caller: Caller,
	me_sentinel: &'a str,
}

impl<'a> PredicateCompiler<'a> {
	pub fn new(ctx: &FilterContext<'a>) -> Self {
		Self {
			dates: DateWindowResolver::new(ctx.today, ctx.first_day_of_week()),
			users: ctx.users,
			tags: ctx.tags,
			caller: ctx.caller(),
			me_sentinel: ctx.settings.me_sentinel.as_str(),
		}
	}

	/// Replace "me" with the caller's id, or the sentinel for anonymous callers.
	///
	/// Only assignee, author and watcher values are rewritten.
	pub fn substitute_me(&self, field: &str, values: &[String]) -> Vec<String> {
		if !ME_FIELDS.contains(&field) || !values.iter().any(|v| v == ME) {
			return values.to_vec();
		}

		let mut substituted: Vec<String> = values.iter().filter(|v| *v != ME).cloned().collect();
		substituted.push(match self.caller.user_id() {
			Some(id) => id.to_string(),
			None => self.me_sentinel.to_string(),
		});
		substituted
	}

	/// Compile one entry.
	///
	/// `values` must already have "me" substituted. Returns `None` for
	/// `subproject_id`, which only shapes the project scope.
	pub fn compile(
		&self,
		field: &FieldDefinition,
		operator: Operator,
		values: &[String],
	) -> Result<Option<SimpleExpr>> {
		field.check_operator(operator)?;

		let fragment = match FieldPath::classify(&field.key) {
			FieldPath::Subprojects => return Ok(None),
			FieldPath::Regular => self.compile_generic(
				&field.key,
				operator,
				values,
				ColumnRef::table_column(ISSUES, field.key.as_str()),
				false,
			)?,
			FieldPath::Custom(id) => self.compile_custom(field, id, operator, values)?,
			FieldPath::Watcher => self.compile_watcher(operator, values)?,
			FieldPath::Membership(kind) => {
				let assignees = MembershipExpander::new(self.users).assignee_filter(kind, operator, values);
				let assignee_field =
					FieldDefinition::new("assigned_to_id", FieldType::ListOptional, 4, "Assignee");
				assignee_field.check_operator(assignees.operator)?;
				self.compile_generic(
					&assignee_field.key,
					assignees.operator,
					&assignees.values(),
					ColumnRef::table_column(ISSUES, "assigned_to_id"),
					false,
				)?
			}
			FieldPath::Tags => self.compile_tags(operator, values),
		};

		Ok(Some(fragment))
	}

	/// Operator semantics shared by every column comparison.
	///
	/// `custom` treats the empty string like NULL for `!*` and `*`.
	pub fn compile_generic(
		&self,
		field: &str,
		operator: Operator,
		values: &[String],
		column: ColumnRef,
		custom: bool,
	) -> Result<SimpleExpr> {
		let col = || Expr::column(column.clone());

		let fragment = match operator {
			Operator::Equals if values.is_empty() => Expr::always_false(),
			Operator::Equals => col().is_in(values),
			Operator::NotEquals if values.is_empty() => Expr::always_true(),
			Operator::NotEquals => col().is_null().or(col().is_not_in(values)),
			Operator::None if custom => col().is_null().or(col().eq("")),
			Operator::None => col().is_null(),
			Operator::Any if custom => col().is_not_null().and(col().ne("")),
			Operator::Any => col().is_not_null(),
			Operator::GreaterOrEqual => col().gte(first_int(values)),
			Operator::LessOrEqual => col().lte(first_int(values)),
			Operator::Open | Operator::Closed if field == "status_id" => {
				Expr::tbl(ISSUE_STATUSES, "is_closed").eq(operator == Operator::Closed)
			}
			Operator::Open | Operator::Closed => {
				return Err(FilterError::UnsupportedOperator {
					field: field.to_string(),
					operator: operator.code().to_string(),
					field_type: FieldType::StatusList,
				});
			}
			Operator::Contains => col().lower().like(contains_pattern(values)),
			Operator::NotContains => col().lower().not_like(contains_pattern(values)),
			Operator::InPastDays
			| Operator::OlderThanDays
			| Operator::DaysAgo
			| Operator::LaterThanDays
			| Operator::InNextDays
			| Operator::DaysAhead
			| Operator::Today
			| Operator::ThisWeek => {
				let window = self
					.dates
					.for_operator(operator, first_int(values))
					.unwrap_or(DateWindow { from: None, to: None });
				date_range(col, window)
			}
		};

		Ok(fragment)
	}

	fn compile_custom(
		&self,
		field: &FieldDefinition,
		custom_field_id: CustomFieldId,
		operator: Operator,
		values: &[String],
	) -> Result<SimpleExpr> {
		let matching = self.compile_generic(
			&field.key,
			operator,
			values,
			ColumnRef::table_column(CUSTOM_VALUES, "value"),
			true,
		)?;

		let customized = Query::select()
			.column(ColumnRef::table_column(ISSUES, "id"))
			.from(ISSUES)
			.left_join(
				CUSTOM_VALUES,
				Cond::all()
					.add(Expr::tbl(CUSTOM_VALUES, "customized_type").eq(ISSUE_TYPE))
					.add(
						Expr::tbl(CUSTOM_VALUES, "customized_id")
							.eq(ColumnRef::table_column(ISSUES, "id")),
					)
					.add(Expr::tbl(CUSTOM_VALUES, "custom_field_id").eq(custom_field_id)),
			)
			.and_where(matching)
			.to_owned();

		Ok(Expr::tbl(ISSUES, "id").in_subquery(customized))
	}

	/// `=` keeps watched issues; every other operator keeps the unwatched ones
	fn compile_watcher(&self, operator: Operator, values: &[String]) -> Result<SimpleExpr> {
		let watchers = self.compile_generic(
			"watcher_id",
			Operator::Equals,
			values,
			ColumnRef::table_column(WATCHERS, "user_id"),
			false,
		)?;

		let watched = Query::select()
			.column(ColumnRef::table_column(WATCHERS, "watchable_id"))
			.from(WATCHERS)
			.and_where(Expr::tbl(WATCHERS, "watchable_type").eq(ISSUE_TYPE))
			.and_where(watchers)
			.to_owned();

		let issue_id = Expr::tbl(ISSUES, "id");
		Ok(if operator == Operator::Equals {
			issue_id.in_subquery(watched)
		} else {
			issue_id.not_in_subquery(watched)
		})
	}

	fn compile_tags(&self, operator: Operator, values: &[String]) -> SimpleExpr {
		self.mark_tag_usage(values);

		let issue_id = Expr::tbl(ISSUES, "id");
		match operator {
			Operator::None => issue_id.not_in_subquery(tagged_issues()),
			Operator::Any => issue_id.in_subquery(tagged_issues()),
			_ => {
				let tagged_with = tagged_issues()
					.inner_join(
						TAGS,
						Expr::tbl(TAGS, "id").eq(ColumnRef::table_column(TAGGINGS, "tag_id")),
					)
					.and_where(Expr::tbl(TAGS, "name").is_in(values))
					.to_owned();
				let fragment = issue_id.in_subquery(tagged_with);
				if operator == Operator::NotEquals {
					fragment.not()
				} else {
					fragment
				}
			}
		}
	}

	/// Touch the selected tags; failures are logged and never propagated
	fn mark_tag_usage(&self, values: &[String]) {
		let mut tag_ids = Vec::new();
		for name in values.iter().filter(|name| !name.trim().is_empty()) {
			match self.tags.find_by_name(name) {
				Some(tag) => tag_ids.push(tag.id),
				None => warn!(tag = %name, "Selected tag does not exist"),
			}
		}
		if tag_ids.is_empty() {
			return;
		}

		if let Err(err) = self.tags.mark_used(&tag_ids, self.dates.today()) {
			warn!(error = %err, tags = ?tag_ids, "Failed to mark tag usage");
		}
	}
}

fn tagged_issues() -> SelectStatement {
	Query::select()
		.column(ColumnRef::table_column(TAGGINGS, "taggable_id"))
		.from(TAGGINGS)
		.and_where(Expr::tbl(TAGGINGS, "taggable_type").eq(ISSUE_TYPE))
		.to_owned()
}

fn date_range<F>(col: F, window: DateWindow) -> SimpleExpr
where
	F: Fn() -> Expr,
{
	let from = window
		.from
		.map(|date| col().gte(NaiveDateTime::new(date, NaiveTime::MIN)));
	let to = window.to.map(|date| col().lte(end_of_day(date)));

	match (from, to) {
		(Some(from), Some(to)) => from.and(to),
		(Some(bound), None) | (None, Some(bound)) => bound,
		(None, None) => Expr::always_true(),
	}
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
	let last_instant = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN);
	NaiveDateTime::new(date, last_instant)
}

fn contains_pattern(values: &[String]) -> String {
	let needle = values.first().map(String::as_str).unwrap_or_default();
	format!("%{}%", needle.to_lowercase())
}

fn first_int(values: &[String]) -> i64 {
	values.first().map(|v| parse_leading_int(v)).unwrap_or(0)
}

/// Integer prefix of a string: optional sign then digits, 0 when absent.
///
/// Out of range values saturate.
pub fn parse_leading_int(value: &str) -> i64 {
	let trimmed = value.trim_start();
	let (negative, rest) = match trimmed.as_bytes().first() {
		Some(b'-') => (true, &trimmed[1..]),
		Some(b'+') => (false, &trimmed[1..]),
		_ => (false, trimmed),
	};

	let mut result: i64 = 0;
	for digit in rest.bytes().take_while(u8::is_ascii_digit) {
		let digit = i64::from(digit - b'0');
		result = if negative {
			result.saturating_mul(10).saturating_sub(digit)
		} else {
			result.saturating_mul(10).saturating_add(digit)
		};
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::directory::{Group, Project, Tag};
	use crate::memory::InMemoryDirectory;
	use crate::settings::FilterSettings;
	use rstest::{fixture, rstest};
	use watchfilter_query::{PostgresQueryBuilder, QueryBuilder};

	fn today() -> NaiveDate {
		// Thursday
		NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
	}

	fn values(items: &[&str]) -> Vec<String> {
		items.iter().map(|v| v.to_string()).collect()
	}

	fn render(fragment: SimpleExpr) -> String {
		PostgresQueryBuilder::new().inline_condition(&Cond::all().add(fragment))
	}

	#[fixture]
	fn directory() -> InMemoryDirectory {
		InMemoryDirectory::new()
			.with_caller(Caller::User(7))
			.with_project(Project::new(1, "Main"))
			.with_group(Group {
				id: 10,
				name: "Developers".to_string(),
				user_ids: vec![3, 2],
			})
			.with_tag(Tag::new(1, "backend"), &[1])
	}

	fn compile_one(
		dir: &InMemoryDirectory,
		key: &str,
		field_type: FieldType,
		operator: Operator,
		items: &[&str],
	) -> Result<String> {
		let settings = FilterSettings::default();
		let ctx = FilterContext::new(dir, &settings).with_today(today());
		let compiler = PredicateCompiler::new(&ctx);
		let field = FieldDefinition::new(key, field_type, 1, key);
		let values = compiler.substitute_me(key, &values(items));
		let fragment = compiler.compile(&field, operator, &values)?;
		Ok(fragment.map(render).unwrap_or_default())
	}

	#[rstest]
	#[case("cf_12", FieldPath::Custom(12))]
	#[case("cf_", FieldPath::Regular)]
	#[case("cf_1x", FieldPath::Regular)]
	#[case("watcher_id", FieldPath::Watcher)]
	#[case("member_of_group", FieldPath::Membership(MembershipKind::Group))]
	#[case("assigned_to_role", FieldPath::Membership(MembershipKind::Role))]
	#[case("tags", FieldPath::Tags)]
	#[case("subproject_id", FieldPath::Subprojects)]
	#[case("status_id", FieldPath::Regular)]
	fn test_classify(#[case] key: &str, #[case] expected: FieldPath) {
		assert_eq!(FieldPath::classify(key), expected);
	}

	#[rstest]
	#[case("42", 42)]
	#[case("  7days", 7)]
	#[case("-3", -3)]
	#[case("+5", 5)]
	#[case("abc", 0)]
	#[case("", 0)]
	#[case("99999999999999999999", i64::MAX)]
	fn test_parse_leading_int(#[case] input: &str, #[case] expected: i64) {
		assert_eq!(parse_leading_int(input), expected);
	}

	#[rstest]
	#[case(Operator::Equals, &["3", "5"], r#""issues"."priority_id" IN ('3', '5')"#)]
	#[case(Operator::Equals, &[], "1 = 0")]
	#[case(Operator::NotEquals, &["3"], r#""issues"."priority_id" IS NULL OR "issues"."priority_id" NOT IN ('3')"#)]
	#[case(Operator::NotEquals, &[], "1 = 1")]
	fn test_list_operators(
		directory: InMemoryDirectory,
		#[case] operator: Operator,
		#[case] items: &[&str],
		#[case] expected: &str,
	) {
		let sql = compile_one(&directory, "priority_id", FieldType::List, operator, items).unwrap();
		assert_eq!(sql, expected);
	}

	#[rstest]
	#[case(Operator::None, r#""issues"."category_id" IS NULL"#)]
	#[case(Operator::Any, r#""issues"."category_id" IS NOT NULL"#)]
	fn test_presence_operators(
		directory: InMemoryDirectory,
		#[case] operator: Operator,
		#[case] expected: &str,
	) {
		let sql = compile_one(&directory, "category_id", FieldType::ListOptional, operator, &[""]).unwrap();
		assert_eq!(sql, expected);
	}

	#[rstest]
	#[case(Operator::Open, r#""issue_statuses"."is_closed" = FALSE"#)]
	#[case(Operator::Closed, r#""issue_statuses"."is_closed" = TRUE"#)]
	fn test_status_open_closed(
		directory: InMemoryDirectory,
		#[case] operator: Operator,
		#[case] expected: &str,
	) {
		let sql = compile_one(&directory, "status_id", FieldType::StatusList, operator, &[""]).unwrap();
		assert_eq!(sql, expected);
	}

	#[rstest]
	fn test_unsupported_operator_is_rejected(directory: InMemoryDirectory) {
		let result = compile_one(&directory, "due_date", FieldType::Date, Operator::Open, &[""]);
		assert!(matches!(
			result,
			Err(FilterError::UnsupportedOperator { ref field, .. }) if field == "due_date"
		));
	}

	#[rstest]
	#[case(Operator::GreaterOrEqual, &["4h"], r#""issues"."estimated_hours" >= 4"#)]
	#[case(Operator::LessOrEqual, &["x"], r#""issues"."estimated_hours" <= 0"#)]
	fn test_integer_comparisons(
		directory: InMemoryDirectory,
		#[case] operator: Operator,
		#[case] items: &[&str],
		#[case] expected: &str,
	) {
		let sql = compile_one(&directory, "estimated_hours", FieldType::Integer, operator, items).unwrap();
		assert_eq!(sql, expected);
	}

	#[rstest]
	#[case(
		Operator::InNextDays,
		&["7"],
		r#""issues"."due_date" >= '2024-03-14 00:00:00' AND "issues"."due_date" <= '2024-03-21 23:59:59.999999'"#
	)]
	#[case(Operator::OlderThanDays, &["2"], r#""issues"."due_date" <= '2024-03-12 23:59:59.999999'"#)]
	#[case(Operator::LaterThanDays, &["1"], r#""issues"."due_date" >= '2024-03-15 00:00:00'"#)]
	#[case(
		Operator::ThisWeek,
		&[""],
		r#""issues"."due_date" >= '2024-03-10 00:00:00' AND "issues"."due_date" <= '2024-03-16 23:59:59.999999'"#
	)]
	fn test_date_operators(
		directory: InMemoryDirectory,
		#[case] operator: Operator,
		#[case] items: &[&str],
		#[case] expected: &str,
	) {
		let sql = compile_one(&directory, "due_date", FieldType::Date, operator, items).unwrap();
		assert_eq!(sql, expected);
	}

	#[rstest]
	fn test_contains_is_case_insensitive(directory: InMemoryDirectory) {
		let sql = compile_one(&directory, "subject", FieldType::Text, Operator::Contains, &["CrAsH"]).unwrap();
		assert_eq!(sql, r#"LOWER("issues"."subject") LIKE '%crash%'"#);

		let sql = compile_one(&directory, "subject", FieldType::Text, Operator::NotContains, &["it's"]).unwrap();
		assert_eq!(sql, r#"LOWER("issues"."subject") NOT LIKE '%it''s%'"#);
	}

	#[rstest]
	fn test_me_substitution(directory: InMemoryDirectory) {
		let sql = compile_one(&directory, "assigned_to_id", FieldType::ListOptional, Operator::Equals, &["me", "4"]).unwrap();
		assert_eq!(sql, r#""issues"."assigned_to_id" IN ('4', '7')"#);

		let anonymous = InMemoryDirectory::new();
		let sql = compile_one(&anonymous, "author_id", FieldType::List, Operator::Equals, &["me"]).unwrap();
		assert_eq!(sql, r#""issues"."author_id" IN ('0')"#);
	}

	#[rstest]
	fn test_me_is_kept_for_other_fields(directory: InMemoryDirectory) {
		let sql = compile_one(&directory, "cf_3", FieldType::String, Operator::Equals, &["me"]).unwrap();
		assert!(sql.contains("'me'"));
	}

	#[rstest]
	fn test_custom_field_subselect(directory: InMemoryDirectory) {
		let sql = compile_one(&directory, "cf_4", FieldType::ListOptional, Operator::None, &[""]).unwrap();
		assert_eq!(
			sql,
			concat!(
				r#""issues"."id" IN (SELECT "issues"."id" FROM "issues" "#,
				r#"LEFT OUTER JOIN "custom_values" ON "custom_values"."customized_type" = 'Issue' "#,
				r#"AND "custom_values"."customized_id" = "issues"."id" "#,
				r#"AND "custom_values"."custom_field_id" = 4 "#,
				r#"WHERE "custom_values"."value" IS NULL OR "custom_values"."value" = '')"#
			)
		);
	}

	#[rstest]
	#[case(Operator::Equals, "IN")]
	#[case(Operator::NotEquals, "NOT IN")]
	fn test_watcher_two_outcomes(
		directory: InMemoryDirectory,
		#[case] operator: Operator,
		#[case] outer: &str,
	) {
		let sql = compile_one(&directory, "watcher_id", FieldType::List, operator, &["me"]).unwrap();
		assert_eq!(
			sql,
			format!(
				concat!(
					r#""issues"."id" {} (SELECT "watchers"."watchable_id" FROM "watchers" "#,
					r#"WHERE "watchers"."watchable_type" = 'Issue' AND "watchers"."user_id" IN ('7'))"#
				),
				outer
			)
		);
	}

	#[rstest]
	fn test_group_membership_expands_to_assignees(directory: InMemoryDirectory) {
		let sql = compile_one(&directory, "member_of_group", FieldType::ListOptional, Operator::Any, &[""]).unwrap();
		assert_eq!(sql, r#""issues"."assigned_to_id" IN ('2', '3')"#);

		let sql = compile_one(&directory, "member_of_group", FieldType::ListOptional, Operator::None, &[""]).unwrap();
		assert_eq!(
			sql,
			r#""issues"."assigned_to_id" IS NULL OR "issues"."assigned_to_id" NOT IN ('2', '3')"#
		);
	}

	#[rstest]
	fn test_tags(directory: InMemoryDirectory) {
		let sql = compile_one(&directory, "tags", FieldType::TagList, Operator::None, &["backend"]).unwrap();
		assert_eq!(
			sql,
			r#""issues"."id" NOT IN (SELECT "taggings"."taggable_id" FROM "taggings" WHERE "taggings"."taggable_type" = 'Issue')"#
		);

		let sql = compile_one(&directory, "tags", FieldType::TagList, Operator::NotEquals, &["backend"]).unwrap();
		assert_eq!(
			sql,
			concat!(
				r#"NOT ("issues"."id" IN (SELECT "taggings"."taggable_id" FROM "taggings" "#,
				r#"INNER JOIN "tags" ON "tags"."id" = "taggings"."tag_id" "#,
				r#"WHERE "taggings"."taggable_type" = 'Issue' AND "tags"."name" IN ('backend')))"#
			)
		);

		assert_eq!(directory.tag_usage_calls(), 2);
		assert_eq!(directory.tag("backend").unwrap().last_used_on, Some(today()));
	}

	#[rstest]
	#[case(Operator::Any)]
	#[case(Operator::None)]
	fn test_blank_tag_values_are_not_looked_up(directory: InMemoryDirectory, #[case] operator: Operator) {
		compile_one(&directory, "tags", FieldType::TagList, operator, &[""]).unwrap();

		assert!(directory.tag_lookups().is_empty());
		assert_eq!(directory.tag_usage_calls(), 0);
	}

	#[rstest]
	fn test_tag_usage_failure_does_not_fail_compile() {
		let dir = InMemoryDirectory::new()
			.with_tag(Tag::new(1, "backend"), &[1])
			.failing_tag_usage();
		let sql = compile_one(&dir, "tags", FieldType::TagList, Operator::Equals, &["backend"]).unwrap();
		assert!(sql.contains(r#""tags"."name" IN ('backend')"#));
		assert_eq!(dir.tag_usage_calls(), 1);
	}

	#[rstest]
	fn test_subproject_entry_compiles_to_nothing(directory: InMemoryDirectory) {
		let sql = compile_one(&directory, "subproject_id", FieldType::SubprojectList, Operator::Equals, &["2"]).unwrap();
		assert!(sql.is_empty());
	}
}
