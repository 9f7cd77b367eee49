use serde_json::Value;

use prism_domain::{Identified, RecordId, SortDirection};

use crate::Result;

/// A storage-level predicate. Field names are storage column names.
#[derive(Clone, Debug, PartialEq)]
pub enum Criterion {
	IdIn(Vec<RecordId>),
	Eq { field: String, value: Value },
	Neq { field: String, value: Value },
	In { field: String, values: Vec<Value> },
	Contains { field: String, value: String },
	Gt { field: String, value: Value },
	Gte { field: String, value: Value },
	Lt { field: String, value: Value },
	Lte { field: String, value: Value },
}
impl Criterion {
	pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Eq { field: field.into(), value: value.into() }
	}

	pub fn neq(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Neq { field: field.into(), value: value.into() }
	}

	pub fn in_list<I, V>(field: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self::In { field: field.into(), values: values.into_iter().map(Into::into).collect() }
	}

	pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
		Self::Contains { field: field.into(), value: value.into() }
	}

	pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Gt { field: field.into(), value: value.into() }
	}

	pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Gte { field: field.into(), value: value.into() }
	}

	pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Lt { field: field.into(), value: value.into() }
	}

	pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Lte { field: field.into(), value: value.into() }
	}
}

/// A lazily evaluated storage query. Each combinator narrows or reorders the scope; nothing is
/// read until `count`, `ids`, `records`, or `fetch_by_ids` is called.
pub trait Scope: Sized {
	type Record: Identified;

	fn apply_filter(self, criterion: Criterion) -> Result<Self>;

	/// Later orderings break ties left by earlier ones.
	fn apply_order(self, field: &str, direction: SortDirection) -> Result<Self>;

	fn limit_offset(self, limit: usize, offset: usize) -> Self;

	fn count(&self) -> Result<usize>;

	/// Identifiers in scope order.
	fn ids(&self) -> Result<Vec<RecordId>>;

	fn records(&self) -> Result<Vec<Self::Record>>;

	/// Records of this scope whose ids are listed. The returned order is unspecified.
	fn fetch_by_ids(&self, ids: &[RecordId]) -> Result<Vec<Self::Record>>;
}
