use std::{
	collections::BTreeSet,
	fmt::{Debug, Formatter},
};

use time::{Date, macros::format_description};

use crate::{
	Error, PresentedMap, PresentedValue, Result,
	presented::{Field, PresentedStruct},
};

/// A field whose value is only computed when the caller asks for it by name.
pub struct OptionalField<'a> {
	compute: Box<dyn FnOnce() -> PresentedValue + 'a>,
}
impl<'a> OptionalField<'a> {
	pub fn new<F, V>(compute: F) -> Self
	where
		F: FnOnce() -> V + 'a,
		V: Into<PresentedValue>,
	{
		Self { compute: Box::new(move || compute().into()) }
	}

	pub fn evaluate(self) -> PresentedValue {
		(self.compute)()
	}
}
impl Debug for OptionalField<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("OptionalField(..)")
	}
}

/// Evaluates requested optional fields and drops the rest without evaluating them.
///
/// Runs after association resolution, so any placeholder still present is a pipeline bug and is
/// reported as a configuration error.
pub fn load_optional_fields<R>(
	presented: PresentedStruct<'_, R>,
	requested: &BTreeSet<String>,
) -> Result<PresentedMap> {
	let mut map = PresentedMap::with_capacity(presented.len());

	for (key, field) in presented {
		match field {
			Field::Value(value) => {
				map.insert(key, value);
			},
			Field::Optional(optional) =>
				if requested.contains(&key) {
					map.insert(key, optional.evaluate());
				},
			Field::Association(_) => {
				return Err(Error::configuration(format!(
					"Association field {key} was not resolved before optional fields were loaded."
				)));
			},
		}
	}

	Ok(map)
}

pub fn dates_to_strings(map: PresentedMap) -> PresentedMap {
	map.into_iter().map(|(key, value)| (key, date_to_string(value))).collect()
}

pub fn datetimes_to_epoch(map: PresentedMap) -> PresentedMap {
	map.into_iter().map(|(key, value)| (key, datetime_to_epoch(value))).collect()
}

pub fn date_to_string(value: PresentedValue) -> PresentedValue {
	match value {
		PresentedValue::Date(date) => PresentedValue::String(format_date(date)),
		PresentedValue::List(items) =>
			PresentedValue::List(items.into_iter().map(date_to_string).collect()),
		PresentedValue::Map(map) => PresentedValue::Map(dates_to_strings(map)),
		other => other,
	}
}

/// Sub-second precision is truncated toward negative infinity.
pub fn datetime_to_epoch(value: PresentedValue) -> PresentedValue {
	match value {
		PresentedValue::DateTime(timestamp) => PresentedValue::Int(timestamp.unix_timestamp()),
		PresentedValue::NaiveDateTime(timestamp) =>
			PresentedValue::Int(timestamp.assume_utc().unix_timestamp()),
		PresentedValue::List(items) =>
			PresentedValue::List(items.into_iter().map(datetime_to_epoch).collect()),
		PresentedValue::Map(map) => PresentedValue::Map(datetimes_to_epoch(map)),
		other => other,
	}
}

pub(crate) fn format_date(date: Date) -> String {
	date.format(format_description!("[year]-[month]-[day]")).unwrap_or_else(|_| {
		format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
	})
}
