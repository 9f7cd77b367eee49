use std::{
	fmt::{Debug, Formatter},
	vec,
};

use crate::{AssociationField, OptionalField, PresentedValue};

/// One top-level slot of a freshly presented record.
pub enum Field<'a, R> {
	Value(PresentedValue),
	Association(AssociationField<'a, R>),
	Optional(OptionalField<'a>),
}
impl<R> Debug for Field<'_, R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
			Self::Association(association) =>
				f.debug_tuple("Association").field(association).finish(),
			Self::Optional(optional) => f.debug_tuple("Optional").field(optional).finish(),
		}
	}
}

/// The output of `Presenter::present`: ordered fields that may still hold association
/// placeholders and optional-field markers.
pub struct PresentedStruct<'a, R> {
	fields: Vec<(String, Field<'a, R>)>,
}
impl<'a, R> PresentedStruct<'a, R> {
	pub fn new() -> Self {
		Self { fields: Vec::new() }
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self { fields: Vec::with_capacity(capacity) }
	}

	pub fn value(mut self, key: impl Into<String>, value: impl Into<PresentedValue>) -> Self {
		self.insert(key, Field::Value(value.into()));

		self
	}

	pub fn association(mut self, key: impl Into<String>, field: AssociationField<'a, R>) -> Self {
		self.insert(key, Field::Association(field));

		self
	}

	pub fn optional<F, V>(mut self, key: impl Into<String>, compute: F) -> Self
	where
		F: FnOnce() -> V + 'a,
		V: Into<PresentedValue>,
	{
		self.insert(key, Field::Optional(OptionalField::new(compute)));

		self
	}

	/// Replaces an existing slot in place, otherwise appends.
	pub fn insert(&mut self, key: impl Into<String>, field: Field<'a, R>) {
		let key = key.into();

		match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => *slot = field,
			None => self.fields.push((key, field)),
		}
	}

	pub fn get(&self, key: &str) -> Option<&Field<'a, R>> {
		self.fields.iter().find(|(existing, _)| existing == key).map(|(_, field)| field)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|(key, _)| key.as_str())
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}
impl<R> Default for PresentedStruct<'_, R> {
	fn default() -> Self {
		Self::new()
	}
}
impl<R> Debug for PresentedStruct<'_, R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.fields.iter().map(|(key, field)| (key, field))).finish()
	}
}
impl<'a, R> IntoIterator for PresentedStruct<'a, R> {
	type IntoIter = vec::IntoIter<(String, Field<'a, R>)>;
	type Item = (String, Field<'a, R>);

	fn into_iter(self) -> Self::IntoIter {
		self.fields.into_iter()
	}
}
