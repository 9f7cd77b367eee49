use std::collections::BTreeMap;

use serde_json::{Map, Value};

use prism_domain::{Identified, RecordId};
use prism_presenter::{AssociationValue, PresentedValue, Record};

static NULL: Value = Value::Null;

/// An in-memory record: JSON columns, typed columns JSON cannot express, and named relations.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
	id: RecordId,
	columns: Map<String, Value>,
	typed: BTreeMap<String, PresentedValue>,
	relations: BTreeMap<String, AssociationValue>,
}
impl Row {
	pub fn new(id: i64) -> Self {
		let mut columns = Map::new();

		columns.insert("id".to_string(), Value::from(id));

		Self { id: RecordId(id), columns, typed: BTreeMap::new(), relations: BTreeMap::new() }
	}

	pub fn with_column(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.columns.insert(name.into(), value.into());

		self
	}

	/// A column holding a value without a JSON form, such as a date.
	pub fn with_value(mut self, name: impl Into<String>, value: impl Into<PresentedValue>) -> Self {
		self.typed.insert(name.into(), value.into());

		self
	}

	pub fn with_relation(mut self, name: impl Into<String>, value: AssociationValue) -> Self {
		self.relations.insert(name.into(), value);

		self
	}

	/// The JSON column used for filtering and ordering. Missing columns read as null.
	pub fn json(&self, name: &str) -> &Value {
		self.columns.get(name).unwrap_or(&NULL)
	}
}
impl Identified for Row {
	fn id(&self) -> RecordId {
		self.id
	}
}
impl Record for Row {
	fn column(&self, name: &str) -> Option<PresentedValue> {
		if let Some(value) = self.typed.get(name) {
			return Some(value.clone());
		}

		self.columns.get(name).cloned().map(PresentedValue::from)
	}

	fn association(&self, name: &str) -> Option<AssociationValue> {
		self.relations.get(name).cloned()
	}
}
