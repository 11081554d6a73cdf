//! Statement builder
//!
//! ANDs the fragments of every filter entry with the project scope
//! fragment into one predicate.

use tracing::debug;
use watchfilter_query::{Cond, Condition, QueryBuilder, SqliteQueryBuilder};

use crate::compiler::PredicateCompiler;
use crate::context::FilterContext;
use crate::error::Result;
use crate::filter_set::FilterSet;
use crate::registry::FieldRegistry;
use crate::scope::ProjectScope;

pub struct StatementBuilder<'a> {
	ctx: FilterContext<'a>,
}

impl<'a> StatementBuilder<'a> {
	pub fn new(ctx: FilterContext<'a>) -> Self {
		Self { ctx }
	}

	/// Build the predicate of a filter set against a fresh registry of the
	/// scope's project
	pub fn build(&self, filters: &FilterSet, scope: &ProjectScope) -> Result<Option<Condition>> {
		let registry = FieldRegistry::build(&self.ctx, scope.project_id)?;
		self.build_with_registry(&registry, filters, scope)
	}

	/// Build the predicate against an existing registry snapshot.
	///
	/// `subproject_id`, unknown fields and entries left without values after
	/// "me" substitution are skipped. `None` means no restriction.
	pub fn build_with_registry(
		&self,
		registry: &FieldRegistry,
		filters: &FilterSet,
		scope: &ProjectScope,
	) -> Result<Option<Condition>> {
		let compiler = PredicateCompiler::new(&self.ctx);
		let mut condition = Cond::all();

		for (field, entry) in filters.iter() {
			if field == "subproject_id" {
				continue;
			}
			let Some(definition) = registry.get(field) else {
				debug!(field, "Skipping filter on unknown field");
				continue;
			};

			let values = compiler.substitute_me(field, &entry.values);
			if values.is_empty() {
				debug!(field, "Skipping filter without values");
				continue;
			}

			condition = condition.add_option(compiler.compile(definition, entry.operator, &values)?);
		}

		condition = condition.add(scope.fragment(self.ctx.projects));

		if condition.is_empty() {
			return Ok(None);
		}

		debug!(
			statement = %SqliteQueryBuilder::new().inline_condition(&condition),
			"Built filter statement"
		);
		Ok(Some(condition))
	}
}
