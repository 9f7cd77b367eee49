use serde_json::{Map, Value};

use prism_domain::SortSpec;

pub const PAGE: &str = "page";
pub const PER_PAGE: &str = "per_page";
pub const SEARCH: &str = "search";
pub const ORDER: &str = "order";

/// Raw request parameters, read leniently: malformed values read as absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams {
	raw: Map<String, Value>,
}
impl QueryParams {
	pub fn new(raw: Map<String, Value>) -> Self {
		Self { raw }
	}

	/// Anything other than a JSON object yields empty parameters.
	pub fn from_value(value: Value) -> Self {
		match value {
			Value::Object(raw) => Self { raw },
			_ => Self::default(),
		}
	}

	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.raw.insert(key.into(), value.into());

		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.raw.get(key)
	}

	pub fn page(&self) -> Option<i64> {
		self.raw.get(PAGE).and_then(integer)
	}

	pub fn per_page(&self) -> Option<i64> {
		self.raw.get(PER_PAGE).and_then(integer)
	}

	/// The trimmed search term, when one is present and not blank.
	pub fn search(&self) -> Option<&str> {
		self.raw
			.get(SEARCH)
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|term| !term.is_empty())
	}

	pub fn order(&self) -> Option<SortSpec> {
		self.raw.get(ORDER).and_then(Value::as_str).and_then(SortSpec::parse)
	}

	/// The value a declared filter reads under `name`.
	///
	/// Null and blank strings are absent, `"true"` and `"false"` become booleans, arrays pass
	/// through, and every other scalar is stringified.
	pub fn filter_value(&self, name: &str) -> Option<Value> {
		match self.raw.get(name)? {
			Value::Null => None,
			Value::String(raw) if raw.trim().is_empty() => None,
			Value::String(raw) => Some(flag_or_string(raw)),
			Value::Bool(flag) => Some(Value::Bool(*flag)),
			Value::Array(items) => Some(Value::Array(items.clone())),
			other => Some(flag_or_string(&other.to_string())),
		}
	}

	/// A comma-separated list parameter, trimmed, with blanks removed. JSON arrays of strings
	/// are accepted too.
	pub fn list(&self, key: &str) -> Vec<String> {
		match self.raw.get(key) {
			Some(Value::String(raw)) => raw
				.split(',')
				.map(str::trim)
				.filter(|item| !item.is_empty())
				.map(str::to_string)
				.collect(),
			Some(Value::Array(items)) => items
				.iter()
				.filter_map(Value::as_str)
				.map(str::trim)
				.filter(|item| !item.is_empty())
				.map(str::to_string)
				.collect(),
			_ => Vec::new(),
		}
	}
}
impl From<Map<String, Value>> for QueryParams {
	fn from(raw: Map<String, Value>) -> Self {
		Self::new(raw)
	}
}

fn integer(value: &Value) -> Option<i64> {
	match value {
		Value::Number(number) => number.as_i64(),
		Value::String(raw) => raw.trim().parse().ok(),
		_ => None,
	}
}

fn flag_or_string(raw: &str) -> Value {
	match raw {
		"true" => Value::Bool(true),
		"false" => Value::Bool(false),
		_ => Value::String(raw.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::{Value, json};

	use crate::QueryParams;

	fn params(value: Value) -> QueryParams {
		QueryParams::from_value(value)
	}

	#[test]
	fn page_numbers_accept_integers_and_integer_strings() {
		assert_eq!(params(json!({ "page": 3 })).page(), Some(3));
		assert_eq!(params(json!({ "page": " 4 " })).page(), Some(4));
		assert_eq!(params(json!({ "page": "four" })).page(), None);
		assert_eq!(params(json!({ "per_page": 2.5 })).per_page(), None);
	}

	#[test]
	fn filter_values_are_coerced() {
		let params = params(json!({
			"owned_by": 5,
			"active": "true",
			"archived": "false",
			"blank": "  ",
			"missing": null,
			"ids": [1, 2],
			"name": "gouda",
		}));

		assert_eq!(params.filter_value("owned_by"), Some(json!("5")));
		assert_eq!(params.filter_value("active"), Some(json!(true)));
		assert_eq!(params.filter_value("archived"), Some(json!(false)));
		assert_eq!(params.filter_value("blank"), None);
		assert_eq!(params.filter_value("missing"), None);
		assert_eq!(params.filter_value("absent"), None);
		assert_eq!(params.filter_value("ids"), Some(json!([1, 2])));
		assert_eq!(params.filter_value("name"), Some(json!("gouda")));
	}

	#[test]
	fn search_terms_are_trimmed_and_blank_terms_are_absent() {
		assert_eq!(params(json!({ "search": "  brie " })).search(), Some("brie"));
		assert_eq!(params(json!({ "search": "   " })).search(), None);
		assert_eq!(params(json!({ "search": 7 })).search(), None);
	}

	#[test]
	fn lists_split_on_commas() {
		let params =
			params(json!({ "include": "user, , owner,", "optional_fields": ["a", " b "] }));

		assert_eq!(params.list("include"), vec!["user", "owner"]);
		assert_eq!(params.list("optional_fields"), vec!["a", "b"]);
		assert!(params.list("other").is_empty());
	}
}
