use serde::Serialize;

use prism_domain::{RecordId, SortSpec};

use crate::Result;

/// Identifiers in rank order plus the engine's own match count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RankedIdSet {
	pub ids: Vec<RecordId>,
	pub total: usize,
}
impl RankedIdSet {
	pub fn new(ids: Vec<RecordId>, total: usize) -> Self {
		Self { ids, total }
	}

	pub fn from_ids<I>(ids: I) -> Self
	where
		I: IntoIterator<Item = i64>,
	{
		let ids: Vec<RecordId> = ids.into_iter().map(RecordId).collect();
		let total = ids.len();

		Self { ids, total }
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
	pub per_page: usize,
	pub page: usize,
	pub order: Option<SortSpec>,
	/// Names of the structured filters active on the request.
	pub filters: Vec<String>,
}

pub trait SearchEngine
where
	Self: Send + Sync,
{
	fn search(&self, term: &str, options: &SearchOptions) -> Result<RankedIdSet>;
}
impl<F> SearchEngine for F
where
	F: Fn(&str, &SearchOptions) -> Result<RankedIdSet> + Send + Sync,
{
	fn search(&self, term: &str, options: &SearchOptions) -> Result<RankedIdSet> {
		self(term, options)
	}
}
