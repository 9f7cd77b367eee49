use std::{
	collections::BTreeSet,
	fmt::{Debug, Formatter},
};

use prism_domain::RecordId;

use crate::{
	Error, LookupCache, LookupTable, PresentedValue, Record, Result, inflect,
	presented::{Field, PresentedStruct},
};

type InlineResolver<'a, R> = Box<dyn Fn(&R) -> Result<AssociationValue> + 'a>;
type BatchLookup<'a, R> = Box<dyn Fn(&[R]) -> Result<LookupTable> + 'a>;

/// One element of a resolved association.
#[derive(Clone, Debug, PartialEq)]
pub enum Related {
	/// A related record, written out as its identifier.
	Record(RecordId),
	/// Any other value, written out unchanged.
	Value(PresentedValue),
}
impl Related {
	fn into_presented(self) -> PresentedValue {
		match self {
			Self::Record(id) => PresentedValue::from(id),
			Self::Value(value) => value,
		}
	}
}
impl From<RecordId> for Related {
	fn from(id: RecordId) -> Self {
		Self::Record(id)
	}
}
impl From<PresentedValue> for Related {
	fn from(value: PresentedValue) -> Self {
		Self::Value(value)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum AssociationValue {
	One(Related),
	Many(Vec<Related>),
}
impl AssociationValue {
	pub fn none() -> Self {
		Self::One(Related::Value(PresentedValue::Null))
	}

	pub fn record(id: RecordId) -> Self {
		Self::One(Related::Record(id))
	}

	pub fn records<I>(ids: I) -> Self
	where
		I: IntoIterator<Item = RecordId>,
	{
		Self::Many(ids.into_iter().map(Related::Record).collect())
	}

	pub fn value(value: impl Into<PresentedValue>) -> Self {
		Self::One(Related::Value(value.into()))
	}

	pub fn values<I, V>(values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<PresentedValue>,
	{
		Self::Many(values.into_iter().map(|value| Related::Value(value.into())).collect())
	}
}

/// How an association placeholder gets its value.
pub enum AssociationSource<'a, R> {
	/// A named accessor on the record. Also enables the `<name>_id` column shortcut.
	Accessor(String),
	/// A closure evaluated against the record being presented.
	Inline(InlineResolver<'a, R>),
	/// A closure evaluated once per batch, producing a table keyed by record id.
	Lookup(BatchLookup<'a, R>),
}

pub struct AssociationField<'a, R> {
	source: AssociationSource<'a, R>,
}
impl<'a, R> AssociationField<'a, R> {
	pub fn accessor(name: impl Into<String>) -> Result<Self> {
		let name = name.into();

		if name.trim().is_empty() {
			return Err(Error::configuration(
				"Association requires an accessor name or a resolution closure.",
			));
		}

		Ok(Self { source: AssociationSource::Accessor(name) })
	}

	pub fn inline<F>(resolve: F) -> Self
	where
		F: Fn(&R) -> Result<AssociationValue> + 'a,
	{
		Self { source: AssociationSource::Inline(Box::new(resolve)) }
	}

	pub fn lookup<F>(lookup: F) -> Self
	where
		F: Fn(&[R]) -> Result<LookupTable> + 'a,
	{
		Self { source: AssociationSource::Lookup(Box::new(lookup)) }
	}
}
impl<R> Debug for AssociationField<'_, R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.source {
			AssociationSource::Accessor(name) => write!(f, "AssociationField::Accessor({name})"),
			AssociationSource::Inline(_) => f.write_str("AssociationField::Inline(..)"),
			AssociationSource::Lookup(_) => f.write_str("AssociationField::Lookup(..)"),
		}
	}
}

/// Resolves one association placeholder for one record.
///
/// Returns the output field name and value, or `None` when the association was not requested
/// and no foreign-key column applies. Dropping the field silently in that case is long-standing
/// behavior that callers depend on.
pub fn resolve<R>(
	record: &R,
	key: &str,
	field: &AssociationField<'_, R>,
	batch: &[R],
	requested: &BTreeSet<String>,
	cache: &mut LookupCache,
) -> Result<Option<(String, PresentedValue)>>
where
	R: Record,
{
	if let AssociationSource::Accessor(name) = &field.source
		&& let Some(foreign_key) = record.column(&format!("{name}_id"))
	{
		return Ok(Some((format!("{key}_id"), foreign_key)));
	}
	if !requested.contains(key) {
		return Ok(None);
	}

	let value = match &field.source {
		AssociationSource::Lookup(lookup) => {
			let table = cache.fetch(key, batch, |records| lookup(records))?;

			table.get(&record.id()).cloned().unwrap_or_else(AssociationValue::none)
		},
		AssociationSource::Accessor(name) => record.association(name).ok_or_else(|| {
			Error::configuration(format!(
				"Record {} has no association accessor named {name}.",
				record.id()
			))
		})?,
		AssociationSource::Inline(inline) => inline(record)?,
	};

	Ok(Some(output_field(key, value)))
}

/// Replaces every association placeholder in `presented` with its resolved id field.
pub fn load_associations<'a, R>(
	presented: PresentedStruct<'a, R>,
	record: &R,
	batch: &[R],
	requested: &BTreeSet<String>,
	cache: &mut LookupCache,
) -> Result<PresentedStruct<'a, R>>
where
	R: Record,
{
	let mut resolved = PresentedStruct::with_capacity(presented.len());

	for (key, field) in presented {
		match field {
			Field::Association(association) => {
				if let Some((name, value)) =
					resolve(record, &key, &association, batch, requested, cache)?
				{
					resolved.insert(name, Field::Value(value));
				}
			},
			other => resolved.insert(key, other),
		}
	}

	Ok(resolved)
}

fn output_field(key: &str, value: AssociationValue) -> (String, PresentedValue) {
	let singular = inflect::singularize(key);

	match value {
		AssociationValue::Many(items) => (
			format!("{singular}_ids"),
			PresentedValue::List(items.into_iter().map(Related::into_presented).collect()),
		),
		AssociationValue::One(item) => (format!("{singular}_id"), item.into_presented()),
	}
}
