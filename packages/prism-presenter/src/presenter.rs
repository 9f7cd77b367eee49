use std::collections::BTreeSet;

use prism_domain::Identified;

use crate::{AssociationValue, Error, PresentedStruct, PresentedValue, Result};

/// Read access to a stored record by attribute and relation name.
pub trait Record: Identified {
	/// `None` when the schema has no such column; `Some(PresentedValue::Null)` when the column
	/// exists but holds no value.
	fn column(&self, name: &str) -> Option<PresentedValue>;

	/// `None` when the record has no accessor with this name.
	fn association(&self, name: &str) -> Option<AssociationValue> {
		let _ = name;

		None
	}
}

pub trait Presenter {
	type Record: Record;

	/// Builds the API shape of one record. Every presenter must override this.
	fn present<'a>(
		&'a self,
		record: &'a Self::Record,
	) -> Result<PresentedStruct<'a, Self::Record>> {
		Err(Error::configuration(format!(
			"{} must override present(record); refusing to present record {}.",
			std::any::type_name::<Self>(),
			record.id()
		)))
	}

	/// Runs once per batch before any record is presented.
	fn custom_preload(&self, records: &[Self::Record], selection: &Selection) -> Result<()> {
		let _ = (records, selection);

		Ok(())
	}

	/// Association names a request may include. `None` allows any declared association.
	fn allowed_includes(&self) -> Option<&[&str]> {
		None
	}
}

/// Optional fields and associations requested for one presentation call.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
	fields: BTreeSet<String>,
	associations: BTreeSet<String>,
}
impl Selection {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_fields<I, S>(mut self, fields: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.fields.extend(fields.into_iter().map(Into::into));

		self
	}

	pub fn with_associations<I, S>(mut self, associations: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.associations.extend(associations.into_iter().map(Into::into));

		self
	}

	pub fn fields(&self) -> &BTreeSet<String> {
		&self.fields
	}

	pub fn associations(&self) -> &BTreeSet<String> {
		&self.associations
	}
}
