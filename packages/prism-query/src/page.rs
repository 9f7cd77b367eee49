use serde::Serialize;

use prism_config::Pagination;
use prism_domain::{Identified, RecordId};

use crate::QueryParams;

/// The page window a request resolves to after clamping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageRequest {
	pub page: usize,
	pub per_page: usize,
}
impl PageRequest {
	/// `per_page` is clamped to `[1, max_per_page]`, and additionally to
	/// `max_filter_and_search_page` when `searching`. Pages below 1 read as 1.
	pub fn resolve(params: &QueryParams, cfg: &Pagination, searching: bool) -> Self {
		let max_per_page = to_usize(i64::from(cfg.max_per_page)).max(1);
		let per_page = params
			.per_page()
			.map(to_usize)
			.unwrap_or_else(|| to_usize(i64::from(cfg.default_per_page)))
			.clamp(1, max_per_page);
		let per_page = if searching {
			per_page.min(to_usize(i64::from(cfg.max_filter_and_search_page)).max(1))
		} else {
			per_page
		};
		let page = params.page().map(to_usize).unwrap_or(1).max(1);

		Self { page, per_page }
	}

	pub fn offset(&self) -> usize {
		(self.page - 1).saturating_mul(self.per_page)
	}

	/// The part of `items` this window covers. Empty past the end.
	pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
		let start = self.offset().min(items.len());
		let end = start.saturating_add(self.per_page).min(items.len());

		&items[start..end]
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<R> {
	pub records: Vec<R>,
	/// Size of the filtered set before slicing.
	pub total_count: usize,
	pub page: usize,
	pub per_page: usize,
}
impl<R> Page<R> {
	pub fn empty(request: PageRequest) -> Self {
		Self { records: Vec::new(), total_count: 0, page: request.page, per_page: request.per_page }
	}

	pub fn total_pages(&self) -> usize {
		if self.per_page == 0 { 0 } else { self.total_count.div_ceil(self.per_page) }
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn ids(&self) -> Vec<RecordId>
	where
		R: Identified,
	{
		self.records.iter().map(Identified::id).collect()
	}
}

fn to_usize(value: i64) -> usize {
	usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}
