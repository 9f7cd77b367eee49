use std::vec;

use serde::{Serialize, Serializer};
use serde_json::Value;
use time::{Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339};

use prism_domain::RecordId;

use crate::fields;

/// A presented value. Temporal variants only exist until post-processing rewrites them.
#[derive(Clone, Debug, PartialEq)]
pub enum PresentedValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	Date(Date),
	DateTime(OffsetDateTime),
	/// A timestamp without an offset, read as UTC.
	NaiveDateTime(PrimitiveDateTime),
	List(Vec<PresentedValue>),
	Map(PresentedMap),
}
impl PresentedValue {
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&PresentedMap> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	pub fn is_temporal(&self) -> bool {
		matches!(self, Self::Date(_) | Self::DateTime(_) | Self::NaiveDateTime(_))
	}
}
impl Serialize for PresentedValue {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Self::Null => serializer.serialize_none(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Int(value) => serializer.serialize_i64(*value),
			Self::Float(value) => serializer.serialize_f64(*value),
			Self::String(value) => serializer.serialize_str(value),
			Self::Date(value) => serializer.serialize_str(&fields::format_date(*value)),
			Self::DateTime(value) => {
				let formatted = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;

				serializer.serialize_str(&formatted)
			},
			Self::NaiveDateTime(value) => {
				let formatted =
					value.assume_utc().format(&Rfc3339).map_err(serde::ser::Error::custom)?;

				serializer.serialize_str(&formatted)
			},
			Self::List(items) => serializer.collect_seq(items),
			Self::Map(map) => map.serialize(serializer),
		}
	}
}
impl From<bool> for PresentedValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl From<i64> for PresentedValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}
impl From<i32> for PresentedValue {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}
impl From<u32> for PresentedValue {
	fn from(value: u32) -> Self {
		Self::Int(i64::from(value))
	}
}
impl From<f64> for PresentedValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}
impl From<&str> for PresentedValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_string())
	}
}
impl From<String> for PresentedValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}
impl From<RecordId> for PresentedValue {
	fn from(value: RecordId) -> Self {
		Self::Int(value.get())
	}
}
impl From<Date> for PresentedValue {
	fn from(value: Date) -> Self {
		Self::Date(value)
	}
}
impl From<OffsetDateTime> for PresentedValue {
	fn from(value: OffsetDateTime) -> Self {
		Self::DateTime(value)
	}
}
impl From<PrimitiveDateTime> for PresentedValue {
	fn from(value: PrimitiveDateTime) -> Self {
		Self::NaiveDateTime(value)
	}
}
impl From<PresentedMap> for PresentedValue {
	fn from(value: PresentedMap) -> Self {
		Self::Map(value)
	}
}
impl<T> From<Vec<T>> for PresentedValue
where
	T: Into<PresentedValue>,
{
	fn from(value: Vec<T>) -> Self {
		Self::List(value.into_iter().map(Into::into).collect())
	}
}
impl<T> From<Option<T>> for PresentedValue
where
	T: Into<PresentedValue>,
{
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Self::Null)
	}
}
impl From<Value> for PresentedValue {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::Bool(value) => Self::Bool(value),
			Value::Number(number) => match number.as_i64() {
				Some(value) => Self::Int(value),
				None => number.as_f64().map(Self::Float).unwrap_or(Self::Null),
			},
			Value::String(value) => Self::String(value),
			Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
			Value::Object(map) =>
				Self::Map(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect()),
		}
	}
}

/// An insertion-ordered field map. Re-inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PresentedMap {
	entries: Vec<(String, PresentedValue)>,
}
impl PresentedMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self { entries: Vec::with_capacity(capacity) }
	}

	pub fn insert(
		&mut self,
		key: impl Into<String>,
		value: impl Into<PresentedValue>,
	) -> Option<PresentedValue> {
		let key = key.into();
		let value = value.into();

		match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => Some(std::mem::replace(slot, value)),
			None => {
				self.entries.push((key, value));

				None
			},
		}
	}

	pub fn get(&self, key: &str) -> Option<&PresentedValue> {
		self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	pub fn remove(&mut self, key: &str) -> Option<PresentedValue> {
		let index = self.entries.iter().position(|(existing, _)| existing == key)?;

		Some(self.entries.remove(index).1)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(key, _)| key.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &PresentedValue)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
impl IntoIterator for PresentedMap {
	type IntoIter = vec::IntoIter<(String, PresentedValue)>;
	type Item = (String, PresentedValue);

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}
impl<K, V> FromIterator<(K, V)> for PresentedMap
where
	K: Into<String>,
	V: Into<PresentedValue>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut map = Self::new();

		for (key, value) in iter {
			map.insert(key, value);
		}

		map
	}
}
impl Serialize for PresentedMap {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_map(self.iter())
	}
}
