use prism_presenter::{Pipeline, PresentedMap, Presenter};
use prism_query::{QueryComposer, QueryParams, QueryRules, Scope};

use crate::{PrismService, Result, selection};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PageMeta {
	pub page_number: usize,
	pub page_count: usize,
	pub page_size: usize,
	pub count: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PresentedPage {
	pub count: usize,
	pub results: Vec<PresentedMap>,
	pub meta: PageMeta,
}

impl PrismService {
	/// Composes the requested page of `base`, then presents its records as one batch.
	pub fn present_page<P, S>(
		&self,
		presenter: &P,
		rules: &QueryRules<S>,
		base: S,
		params: &QueryParams,
	) -> Result<PresentedPage>
	where
		P: Presenter,
		S: Scope<Record = P::Record>,
	{
		let selection = selection::selection_from_params(presenter, params);
		let page = QueryComposer::new(&self.cfg, rules, params).execute(base)?;
		let results = Pipeline::new(presenter).present_batch(&page.records, &selection)?;
		let meta = PageMeta {
			page_number: page.page,
			page_count: page.total_pages(),
			page_size: page.per_page,
			count: page.total_count,
		};

		Ok(PresentedPage { count: page.total_count, results, meta })
	}

	/// Presents one record with the selection carried by `params`.
	pub fn present_record<P>(
		&self,
		presenter: &P,
		record: &P::Record,
		params: &QueryParams,
	) -> Result<PresentedMap>
	where
		P: Presenter,
	{
		let selection = selection::selection_from_params(presenter, params);

		Ok(Pipeline::new(presenter).present_one(record, &selection)?)
	}
}
