use std::{
	collections::BTreeMap,
	fmt::{Debug, Formatter},
};

use serde_json::Value;

use prism_config::Sorting;
use prism_domain::{SortDirection, SortSpec};

use crate::{Error, QueryParams, Result, Scope, SearchEngine};

type FilterFn<S> = Box<dyn Fn(S, &Value) -> Result<S> + Send + Sync>;
type SortFn<S> = Box<dyn Fn(S, SortDirection) -> Result<S> + Send + Sync>;

pub struct FilterRule<S> {
	default: Option<Value>,
	apply: FilterFn<S>,
}
impl<S> FilterRule<S> {
	pub fn default_value(&self) -> Option<&Value> {
		self.default.as_ref()
	}

	pub fn apply(&self, scope: S, value: &Value) -> Result<S> {
		(self.apply)(scope, value)
	}
}

pub enum SortRule<S> {
	/// Ordered natively by a storage column.
	Column(String),
	Custom(SortFn<S>),
}

/// A sort order after request resolution. `explicit` is set only when the request named a
/// declared sort order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedSort {
	pub spec: SortSpec,
	pub explicit: bool,
}

/// Declared filters, sort orders, and search collaborator of one queryable collection.
pub struct QueryRules<S> {
	filters: BTreeMap<String, FilterRule<S>>,
	sort_orders: BTreeMap<String, SortRule<S>>,
	default_sort: Option<SortSpec>,
	search: Option<Box<dyn SearchEngine>>,
}
impl<S> QueryRules<S> {
	pub fn builder() -> QueryRulesBuilder<S> {
		QueryRulesBuilder::new()
	}

	/// Declared filters in name order.
	pub fn filters(&self) -> impl Iterator<Item = (&str, &FilterRule<S>)> {
		self.filters.iter().map(|(name, rule)| (name.as_str(), rule))
	}

	pub fn sort_order(&self, name: &str) -> Option<&SortRule<S>> {
		self.sort_orders.get(name)
	}

	pub fn has_sort_order(&self, name: &str) -> bool {
		self.sort_orders.contains_key(name)
	}

	pub fn search_engine(&self) -> Option<&dyn SearchEngine> {
		self.search.as_deref()
	}

	/// The declared default sort, else the configured one.
	pub fn default_sort(&self, cfg: &Sorting) -> SortSpec {
		self.default_sort
			.clone()
			.or_else(|| SortSpec::parse(&cfg.default_order))
			.unwrap_or_else(|| SortSpec::new("updated_at", SortDirection::Desc))
	}

	/// Picks the requested sort when it names a declared sort order, otherwise the default.
	pub fn resolve_sort(&self, params: &QueryParams, cfg: &Sorting) -> ResolvedSort {
		match params.order() {
			Some(requested) if self.has_sort_order(&requested.name) =>
				ResolvedSort { spec: requested, explicit: true },
			Some(requested) => {
				tracing::debug!(
					sort_order = %requested.name,
					"Unknown sort order requested. Falling back to the default."
				);

				ResolvedSort { spec: self.default_sort(cfg), explicit: false }
			},
			None => ResolvedSort { spec: self.default_sort(cfg), explicit: false },
		}
	}

	/// Applies `spec` through its declared rule, or as a column ordering when undeclared.
	pub fn apply_sort(&self, scope: S, spec: &SortSpec) -> Result<S>
	where
		S: Scope,
	{
		match self.sort_orders.get(&spec.name) {
			Some(SortRule::Column(column)) => scope.apply_order(column, spec.direction),
			Some(SortRule::Custom(order)) => order(scope, spec.direction),
			None => scope.apply_order(&spec.name, spec.direction),
		}
	}
}
impl<S> Debug for QueryRules<S> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QueryRules")
			.field("filters", &self.filters.keys().collect::<Vec<_>>())
			.field("sort_orders", &self.sort_orders.keys().collect::<Vec<_>>())
			.field("default_sort", &self.default_sort)
			.field("search", &self.search.is_some())
			.finish()
	}
}

pub struct QueryRulesBuilder<S> {
	filters: BTreeMap<String, FilterRule<S>>,
	sort_orders: BTreeMap<String, SortRule<S>>,
	default_sort: Option<String>,
	search: Option<Box<dyn SearchEngine>>,
}
impl<S> QueryRulesBuilder<S> {
	pub fn new() -> Self {
		Self {
			filters: BTreeMap::new(),
			sort_orders: BTreeMap::new(),
			default_sort: None,
			search: None,
		}
	}

	/// Declares a filter. A later declaration under the same name replaces the earlier one.
	pub fn filter<F>(mut self, name: impl Into<String>, apply: F) -> Self
	where
		F: Fn(S, &Value) -> Result<S> + Send + Sync + 'static,
	{
		self.filters.insert(name.into(), FilterRule { default: None, apply: Box::new(apply) });

		self
	}

	pub fn filter_with_default<F>(
		mut self,
		name: impl Into<String>,
		default: impl Into<Value>,
		apply: F,
	) -> Self
	where
		F: Fn(S, &Value) -> Result<S> + Send + Sync + 'static,
	{
		self.filters.insert(
			name.into(),
			FilterRule { default: Some(default.into()), apply: Box::new(apply) },
		);

		self
	}

	pub fn sort_column(mut self, name: impl Into<String>, column: impl Into<String>) -> Self {
		self.sort_orders.insert(name.into(), SortRule::Column(column.into()));

		self
	}

	pub fn sort_with<F>(mut self, name: impl Into<String>, order: F) -> Self
	where
		F: Fn(S, SortDirection) -> Result<S> + Send + Sync + 'static,
	{
		self.sort_orders.insert(name.into(), SortRule::Custom(Box::new(order)));

		self
	}

	/// `<name>:<asc|desc>`. Overrides the configured default.
	pub fn default_sort_order(mut self, raw: impl Into<String>) -> Self {
		self.default_sort = Some(raw.into());

		self
	}

	pub fn search<E>(mut self, engine: E) -> Self
	where
		E: SearchEngine + 'static,
	{
		self.search = Some(Box::new(engine));

		self
	}

	pub fn build(self) -> Result<QueryRules<S>> {
		if let Some(name) = self
			.filters
			.keys()
			.chain(self.sort_orders.keys())
			.find(|name| name.trim().is_empty())
		{
			return Err(Error::Configuration {
				message: format!("Filter and sort order names must not be blank; got {name:?}."),
			});
		}

		let default_sort = self.default_sort.as_deref().map(parse_default_sort).transpose()?;

		Ok(QueryRules {
			filters: self.filters,
			sort_orders: self.sort_orders,
			default_sort,
			search: self.search,
		})
	}
}
impl<S> Default for QueryRulesBuilder<S> {
	fn default() -> Self {
		Self::new()
	}
}

fn parse_default_sort(raw: &str) -> Result<SortSpec> {
	let invalid = || Error::Configuration {
		message: format!("Default sort order must look like 'name:asc'; got {raw:?}."),
	};
	let (name, direction) = raw.split_once(':').ok_or_else(invalid)?;
	let direction = SortDirection::parse(direction).ok_or_else(invalid)?;
	let name = name.trim();

	if name.is_empty() {
		return Err(invalid());
	}

	Ok(SortSpec::new(name, direction))
}

#[cfg(test)]
mod tests {
	use prism_config::Sorting;
	use prism_domain::{SortDirection, SortSpec};

	use crate::{Error, QueryParams, QueryRules, Result};

	struct Unit;

	fn rules() -> QueryRules<Unit> {
		QueryRules::builder()
			.sort_column("title", "name")
			.sort_with("popularity", |scope: Unit, _| Ok(scope))
			.build()
			.expect("Rules must build.")
	}

	fn sorting() -> Sorting {
		Sorting { default_order: "updated_at:desc".to_string() }
	}

	#[test]
	fn declared_sort_orders_are_explicit() {
		let params = QueryParams::default().with("order", "title:DESC");
		let resolved = rules().resolve_sort(&params, &sorting());

		assert!(resolved.explicit);
		assert_eq!(resolved.spec, SortSpec::new("title", SortDirection::Desc));
	}

	#[test]
	fn unknown_sort_orders_fall_back_to_the_default() {
		let params = QueryParams::default().with("order", "shoe_size:asc");
		let resolved = rules().resolve_sort(&params, &sorting());

		assert!(!resolved.explicit);
		assert_eq!(resolved.spec, SortSpec::new("updated_at", SortDirection::Desc));
		assert_eq!(resolved, rules().resolve_sort(&QueryParams::default(), &sorting()));
	}

	#[test]
	fn unknown_directions_read_as_ascending() {
		let params = QueryParams::default().with("order", "title:sideways");

		assert_eq!(rules().resolve_sort(&params, &sorting()).spec.direction, SortDirection::Asc);
	}

	#[test]
	fn declared_default_sort_overrides_config() {
		let rules: QueryRules<Unit> = QueryRules::builder()
			.default_sort_order("title:asc")
			.build()
			.expect("Rules must build.");

		assert_eq!(rules.default_sort(&sorting()), SortSpec::new("title", SortDirection::Asc));
	}

	#[test]
	fn malformed_default_sort_is_rejected() {
		for raw in ["title", "title:up", ":desc"] {
			let result: Result<QueryRules<Unit>> =
				QueryRules::builder().default_sort_order(raw).build();

			assert!(matches!(result, Err(Error::Configuration { .. })), "{raw}");
		}
	}

	#[test]
	fn blank_rule_names_are_rejected() {
		let result: Result<QueryRules<Unit>> =
			QueryRules::builder().sort_column(" ", "name").build();

		assert!(matches!(result, Err(Error::Configuration { .. })));
	}
}
