use serde::Deserialize;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_MAX_PER_PAGE: u32 = 200;
pub const DEFAULT_MAX_FILTER_AND_SEARCH_PAGE: u32 = 500;
pub const DEFAULT_SORT_ORDER: &str = "updated_at:desc";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
	pub pagination: Pagination,
	#[serde(default)]
	pub sorting: Sorting,
	#[serde(default)]
	pub filters: Filters,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Pagination {
	pub default_per_page: u32,
	pub max_per_page: u32,
	/// Upper bound for both the search candidate window and the page size of a search request.
	pub max_filter_and_search_page: u32,
}
impl Default for Pagination {
	fn default() -> Self {
		Self {
			default_per_page: DEFAULT_PER_PAGE,
			max_per_page: DEFAULT_MAX_PER_PAGE,
			max_filter_and_search_page: DEFAULT_MAX_FILTER_AND_SEARCH_PAGE,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Sorting {
	/// Formatted as `<name>:<asc|desc>`.
	#[serde(default = "default_sort_order")]
	pub default_order: String,
}
impl Default for Sorting {
	fn default() -> Self {
		Self { default_order: default_sort_order() }
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Filters {
	#[serde(default = "default_apply_defaults")]
	pub apply_defaults: bool,
}
impl Default for Filters {
	fn default() -> Self {
		Self { apply_defaults: default_apply_defaults() }
	}
}

fn default_sort_order() -> String {
	DEFAULT_SORT_ORDER.to_string()
}

fn default_apply_defaults() -> bool {
	true
}
