use std::sync::{
	Arc, Mutex,
	atomic::{AtomicUsize, Ordering},
};

use prism_query::{Error, RankedIdSet, Result, SearchEngine, SearchOptions};

#[derive(Debug, Default)]
struct Observed {
	term: Option<String>,
	options: Option<SearchOptions>,
}

/// A [`SearchEngine`] that answers every term with the same ranked ids.
///
/// Clones share call statistics, so a test can keep one clone after handing the other to the
/// query rules.
#[derive(Clone, Debug, Default)]
pub struct FixedSearch {
	ranked: RankedIdSet,
	failure: Option<String>,
	calls: Arc<AtomicUsize>,
	observed: Arc<Mutex<Observed>>,
}
impl FixedSearch {
	pub fn new(ranked: RankedIdSet) -> Self {
		Self { ranked, ..Self::default() }
	}

	pub fn from_ids<I>(ids: I) -> Self
	where
		I: IntoIterator<Item = i64>,
	{
		Self::new(RankedIdSet::from_ids(ids))
	}

	pub fn failing(message: impl Into<String>) -> Self {
		Self { failure: Some(message.into()), ..Self::default() }
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn last_term(&self) -> Option<String> {
		self.observed.lock().unwrap_or_else(|err| err.into_inner()).term.clone()
	}

	pub fn last_options(&self) -> Option<SearchOptions> {
		self.observed.lock().unwrap_or_else(|err| err.into_inner()).options.clone()
	}
}
impl SearchEngine for FixedSearch {
	fn search(&self, term: &str, options: &SearchOptions) -> Result<RankedIdSet> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		{
			let mut observed = self.observed.lock().unwrap_or_else(|err| err.into_inner());

			observed.term = Some(term.to_string());
			observed.options = Some(options.clone());
		}

		match &self.failure {
			Some(message) => Err(Error::Search { message: message.clone() }),
			None => Ok(self.ranked.clone()),
		}
	}
}
