use std::collections::HashMap;

use prism_domain::RecordId;

use crate::{AssociationValue, Result};

pub type LookupTable = HashMap<RecordId, AssociationValue>;

/// Per-batch memo of lookup-backed association tables, keyed by association name.
///
/// A table is computed at most once per cache, from the whole batch, and every later read of
/// the same name sees that table. One cache must never outlive the batch it was created for.
#[derive(Debug, Default)]
pub struct LookupCache {
	tables: HashMap<String, Option<LookupTable>>,
}
impl LookupCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds uncomputed entries for the associations requested by the batch.
	pub fn for_associations<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { tables: names.into_iter().map(|name| (name.into(), None)).collect() }
	}

	/// Returns the table for `name`, running `compute` over the full batch on first use.
	///
	/// A failed computation leaves the entry uncomputed.
	pub fn fetch<T, F>(&mut self, name: &str, batch: &[T], compute: F) -> Result<&LookupTable>
	where
		F: FnOnce(&[T]) -> Result<LookupTable>,
	{
		let slot = self.tables.entry(name.to_string()).or_default();
		let table = match slot.take() {
			Some(table) => table,
			None => {
				let table = compute(batch)?;

				tracing::debug!(
					association = name,
					batch_size = batch.len(),
					table_size = table.len(),
					"Lookup table computed."
				);

				table
			},
		};
		let table: &LookupTable = slot.insert(table);

		Ok(table)
	}

	pub fn is_computed(&self, name: &str) -> bool {
		self.tables.get(name).is_some_and(Option::is_some)
	}

	pub fn table(&self, name: &str) -> Option<&LookupTable> {
		self.tables.get(name).and_then(Option::as_ref)
	}

	pub fn computed_count(&self) -> usize {
		self.tables.values().filter(|table| table.is_some()).count()
	}
}
