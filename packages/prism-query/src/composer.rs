use std::collections::{HashMap, HashSet};

use serde_json::Value;

use prism_config::Config;
use prism_domain::{Identified, RecordId};

use crate::{
	Criterion, FilterRule, Page, PageRequest, QueryParams, QueryRules, Result, Scope, SearchEngine,
	SearchOptions,
};

type ActiveFilter<'q, S> = (&'q str, &'q FilterRule<S>, Value);

/// Turns one request into one page of records.
pub struct QueryComposer<'q, S> {
	cfg: &'q Config,
	rules: &'q QueryRules<S>,
	params: &'q QueryParams,
}
impl<'q, S> QueryComposer<'q, S>
where
	S: Scope,
{
	pub fn new(cfg: &'q Config, rules: &'q QueryRules<S>, params: &'q QueryParams) -> Self {
		Self { cfg, rules, params }
	}

	pub fn execute(&self, base: S) -> Result<Page<S::Record>> {
		match (self.params.search(), self.rules.search_engine()) {
			(Some(term), Some(engine)) => self.execute_search(base, term, engine),
			(Some(_), None) => {
				tracing::debug!("Search term ignored. No search engine is declared.");

				self.execute_structured(base)
			},
			(None, _) => self.execute_structured(base),
		}
	}

	fn execute_search(
		&self,
		base: S,
		term: &str,
		engine: &dyn SearchEngine,
	) -> Result<Page<S::Record>> {
		let request = PageRequest::resolve(self.params, &self.cfg.pagination, true);
		let sort = self.rules.resolve_sort(self.params, &self.cfg.sorting);
		let active = self.active_filters();
		let options = SearchOptions {
			per_page: usize::try_from(self.cfg.pagination.max_filter_and_search_page)
				.unwrap_or(usize::MAX),
			page: 1,
			order: Some(sort.spec.clone()),
			filters: active.iter().map(|(name, _, _)| name.to_string()).collect(),
		};
		let ranked = engine.search(term, &options)?;

		if ranked.is_empty() {
			tracing::info!(
				branch = "search",
				total_count = 0,
				page = request.page,
				per_page = request.per_page,
				"Composed result page."
			);

			return Ok(Page::empty(request));
		}

		let scope = base.apply_filter(Criterion::IdIn(ranked.ids.clone()))?;
		let scope = self.apply_filters(scope, active)?;
		// An explicitly requested, declared sort order replaces rank order.
		let (scope, ordered) = if sort.explicit {
			let scope = self.rules.apply_sort(scope, &sort.spec)?;
			let ranked_ids: HashSet<RecordId> = ranked.ids.iter().copied().collect();
			let ordered = ordered_intersection(&scope.ids()?, &ranked_ids);

			(scope, ordered)
		} else {
			let members: HashSet<RecordId> = scope.ids()?.into_iter().collect();
			let ordered = ordered_intersection(&ranked.ids, &members);

			(scope, ordered)
		};
		let slice = request.slice(&ordered);
		let records = if slice.is_empty() {
			Vec::new()
		} else {
			order_by_ids(scope.fetch_by_ids(slice)?, slice)
		};

		tracing::debug!(
			ranked = ranked.ids.len(),
			engine_total = ranked.total,
			matched = ordered.len(),
			explicit_order = sort.explicit,
			"Intersected search results with filters."
		);
		tracing::info!(
			branch = "search",
			total_count = ordered.len(),
			page = request.page,
			per_page = request.per_page,
			"Composed result page."
		);

		Ok(Page {
			records,
			total_count: ordered.len(),
			page: request.page,
			per_page: request.per_page,
		})
	}

	fn execute_structured(&self, base: S) -> Result<Page<S::Record>> {
		let request = PageRequest::resolve(self.params, &self.cfg.pagination, false);
		let sort = self.rules.resolve_sort(self.params, &self.cfg.sorting);
		let scope = self.apply_filters(base, self.active_filters())?;
		let scope = self.rules.apply_sort(scope, &sort.spec)?;
		let total_count = scope.count()?;
		let records = scope.limit_offset(request.per_page, request.offset()).records()?;

		tracing::info!(
			branch = "structured",
			total_count,
			page = request.page,
			per_page = request.per_page,
			"Composed result page."
		);

		Ok(Page { records, total_count, page: request.page, per_page: request.per_page })
	}

	/// Declared filters that carry a value on this request, in name order.
	fn active_filters(&self) -> Vec<ActiveFilter<'q, S>> {
		self.rules
			.filters()
			.filter_map(|(name, rule)| {
				let default = || {
					if self.cfg.filters.apply_defaults { rule.default_value().cloned() } else { None }
				};
				let value = self.params.filter_value(name).or_else(default)?;

				Some((name, rule, value))
			})
			.collect()
	}

	fn apply_filters(&self, scope: S, active: Vec<ActiveFilter<'q, S>>) -> Result<S> {
		active.into_iter().try_fold(scope, |scope, (_, rule, value)| rule.apply(scope, &value))
	}
}

/// `ranked` in order, keeping ids present in `members` and dropping repeats.
pub fn ordered_intersection(ranked: &[RecordId], members: &HashSet<RecordId>) -> Vec<RecordId> {
	let mut seen = HashSet::with_capacity(members.len());

	ranked.iter().copied().filter(|id| members.contains(id) && seen.insert(*id)).collect()
}

/// Arranges `records` in the order of `ids`. Ids without a record are skipped.
pub fn order_by_ids<R>(records: Vec<R>, ids: &[RecordId]) -> Vec<R>
where
	R: Identified,
{
	let mut by_id: HashMap<RecordId, R> =
		records.into_iter().map(|record| (record.id(), record)).collect();

	ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use prism_domain::RecordId;

	use crate::composer::{order_by_ids, ordered_intersection};

	fn ids(raw: &[i64]) -> Vec<RecordId> {
		raw.iter().copied().map(RecordId).collect()
	}

	#[test]
	fn intersection_keeps_rank_order() {
		let ranked = ids(&[2, 3, 4, 5, 6, 8, 9, 10, 11, 12]);
		let members: HashSet<RecordId> = ids(&[11, 10, 8, 5, 4, 3, 2]).into_iter().collect();

		assert_eq!(ordered_intersection(&ranked, &members), ids(&[2, 3, 4, 5, 8, 10, 11]));
	}

	#[test]
	fn intersection_drops_repeated_ids() {
		let ranked = ids(&[4, 2, 4, 9, 2]);
		let members: HashSet<RecordId> = ids(&[2, 4]).into_iter().collect();

		assert_eq!(ordered_intersection(&ranked, &members), ids(&[4, 2]));
	}

	#[test]
	fn records_follow_the_id_order_and_missing_ids_are_skipped() {
		let records = ids(&[5, 3, 1]);

		assert_eq!(order_by_ids(records, &ids(&[1, 7, 3, 5])), ids(&[1, 3, 5]));
	}
}
