use std::{
	cmp::Ordering,
	collections::HashSet,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering as AtomicOrdering},
	},
};

use serde_json::Value;

use prism_domain::{Identified, RecordId, SortDirection};
use prism_query::{Criterion, Error, Result, Scope};

use crate::Row;

/// A [`Scope`] over rows held in memory.
///
/// Clones share the dataset and the read counter.
#[derive(Clone, Debug)]
pub struct MemoryScope {
	rows: Arc<Vec<Row>>,
	criteria: Vec<Criterion>,
	orders: Vec<(String, SortDirection)>,
	window: Option<(usize, usize)>,
	reversed_fetch: bool,
	failure: Option<String>,
	reads: Arc<AtomicUsize>,
}
impl MemoryScope {
	pub fn new(rows: Vec<Row>) -> Self {
		Self {
			rows: Arc::new(rows),
			criteria: Vec::new(),
			orders: Vec::new(),
			window: None,
			reversed_fetch: false,
			failure: None,
			reads: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// `fetch_by_ids` returns rows in reverse storage order.
	pub fn with_reversed_fetch(mut self) -> Self {
		self.reversed_fetch = true;

		self
	}

	/// Every read fails with a storage error carrying `message`.
	pub fn failing(mut self, message: impl Into<String>) -> Self {
		self.failure = Some(message.into());

		self
	}

	/// Reads served so far by this scope and its clones.
	pub fn reads(&self) -> usize {
		self.reads.load(AtomicOrdering::SeqCst)
	}

	fn read(&self) -> Result<()> {
		self.reads.fetch_add(1, AtomicOrdering::SeqCst);

		match &self.failure {
			Some(message) => Err(Error::Storage { message: message.clone() }),
			None => Ok(()),
		}
	}

	fn filtered(&self) -> Vec<&Row> {
		self.rows
			.iter()
			.filter(|row| self.criteria.iter().all(|criterion| satisfies(row, criterion)))
			.collect()
	}

	fn evaluate(&self) -> Vec<&Row> {
		let mut rows = self.filtered();

		rows.sort_by(|left, right| {
			self.orders.iter().fold(Ordering::Equal, |ordering, (field, direction)| {
				ordering.then_with(|| {
					let ordering = compare(left.json(field), right.json(field));

					match direction {
						SortDirection::Asc => ordering,
						SortDirection::Desc => ordering.reverse(),
					}
				})
			})
		});

		if let Some((limit, offset)) = self.window {
			rows = rows.into_iter().skip(offset).take(limit).collect();
		}

		rows
	}
}
impl Scope for MemoryScope {
	type Record = Row;

	fn apply_filter(mut self, criterion: Criterion) -> Result<Self> {
		self.criteria.push(criterion);

		Ok(self)
	}

	fn apply_order(mut self, field: &str, direction: SortDirection) -> Result<Self> {
		self.orders.push((field.to_string(), direction));

		Ok(self)
	}

	fn limit_offset(mut self, limit: usize, offset: usize) -> Self {
		self.window = Some((limit, offset));

		self
	}

	fn count(&self) -> Result<usize> {
		self.read()?;

		Ok(self.evaluate().len())
	}

	fn ids(&self) -> Result<Vec<RecordId>> {
		self.read()?;

		Ok(self.evaluate().into_iter().map(Identified::id).collect())
	}

	fn records(&self) -> Result<Vec<Row>> {
		self.read()?;

		Ok(self.evaluate().into_iter().cloned().collect())
	}

	fn fetch_by_ids(&self, ids: &[RecordId]) -> Result<Vec<Row>> {
		self.read()?;

		let wanted: HashSet<RecordId> = ids.iter().copied().collect();
		let mut rows: Vec<Row> =
			self.filtered().into_iter().filter(|row| wanted.contains(&row.id())).cloned().collect();

		if self.reversed_fetch {
			rows.reverse();
		}

		Ok(rows)
	}
}

fn satisfies(row: &Row, criterion: &Criterion) -> bool {
	match criterion {
		Criterion::IdIn(ids) => ids.contains(&row.id()),
		Criterion::Eq { field, value } => loosely_equal(row.json(field), value),
		Criterion::Neq { field, value } => !loosely_equal(row.json(field), value),
		Criterion::In { field, values } =>
			values.iter().any(|value| loosely_equal(row.json(field), value)),
		Criterion::Contains { field, value } => text(row.json(field))
			.is_some_and(|text| text.to_lowercase().contains(&value.to_lowercase())),
		Criterion::Gt { field, value } => ordered(row.json(field), value, Ordering::is_gt),
		Criterion::Gte { field, value } => ordered(row.json(field), value, Ordering::is_ge),
		Criterion::Lt { field, value } => ordered(row.json(field), value, Ordering::is_lt),
		Criterion::Lte { field, value } => ordered(row.json(field), value, Ordering::is_le),
	}
}

// Request values arrive stringified, so `5` and `"5"` are equal.
fn loosely_equal(left: &Value, right: &Value) -> bool {
	left == right || matches!((text(left), text(right)), (Some(left), Some(right)) if left == right)
}

fn ordered(left: &Value, right: &Value, accept: fn(Ordering) -> bool) -> bool {
	!left.is_null() && !right.is_null() && accept(compare(left, right))
}

fn text(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}

fn number(value: &Value) -> Option<f64> {
	match value {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}

/// Nulls first; numbers compare numerically, even when one side is a numeric string.
fn compare(left: &Value, right: &Value) -> Ordering {
	match (left, right) {
		(Value::Null, Value::Null) => Ordering::Equal,
		(Value::Null, _) => Ordering::Less,
		(_, Value::Null) => Ordering::Greater,
		(Value::Bool(left), Value::Bool(right)) => left.cmp(right),
		(Value::String(left), Value::String(right)) => left.cmp(right),
		_ => match (number(left), number(right)) {
			(Some(left), Some(right)) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
			_ => Ordering::Equal,
		},
	}
}
