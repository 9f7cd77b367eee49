use crate::{
	LookupCache, PresentedMap, PresentedStruct, Presenter, Record, Result, Selection,
	association, fields,
};

/// Drives a presenter over records and post-processes what it returns.
pub struct Pipeline<'p, P> {
	presenter: &'p P,
}
impl<'p, P> Pipeline<'p, P>
where
	P: Presenter,
{
	pub fn new(presenter: &'p P) -> Self {
		Self { presenter }
	}

	/// Presents a batch. The preload hook runs once up front and lookup tables are shared by
	/// every record of the batch. Any error aborts the whole batch.
	pub fn present_batch(
		&self,
		records: &[P::Record],
		selection: &Selection,
	) -> Result<Vec<PresentedMap>> {
		self.presenter.custom_preload(records, selection)?;

		let mut cache = LookupCache::for_associations(selection.associations().iter().cloned());
		let mut presented = Vec::with_capacity(records.len());

		for record in records {
			presented.push(self.present_in_batch(record, records, selection, &mut cache)?);
		}

		tracing::debug!(
			records = records.len(),
			lookup_tables = cache.computed_count(),
			"Presented record batch."
		);

		Ok(presented)
	}

	/// Presents a single record as a batch of one, without the preload hook.
	pub fn present_one(&self, record: &P::Record, selection: &Selection) -> Result<PresentedMap> {
		let mut cache = LookupCache::for_associations(selection.associations().iter().cloned());

		self.present_in_batch(record, std::slice::from_ref(record), selection, &mut cache)
	}

	fn present_in_batch(
		&self,
		record: &P::Record,
		batch: &[P::Record],
		selection: &Selection,
		cache: &mut LookupCache,
	) -> Result<PresentedMap> {
		let presented = self.presenter.present(record)?;

		post_process(presented, record, batch, selection, cache)
	}
}

/// Association resolution, then optional fields, then dates, then timestamps.
pub fn post_process<R>(
	presented: PresentedStruct<'_, R>,
	record: &R,
	batch: &[R],
	selection: &Selection,
	cache: &mut LookupCache,
) -> Result<PresentedMap>
where
	R: Record,
{
	let presented =
		association::load_associations(presented, record, batch, selection.associations(), cache)?;
	let map = fields::load_optional_fields(presented, selection.fields())?;

	Ok(fields::datetimes_to_epoch(fields::dates_to_strings(map)))
}
