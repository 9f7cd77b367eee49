pub mod sort;

pub use sort::{SortDirection, SortSpec};

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Stable identifier of a stored record.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);
impl RecordId {
	pub fn get(self) -> i64 {
		self.0
	}
}
impl From<i64> for RecordId {
	fn from(value: i64) -> Self {
		Self(value)
	}
}
impl Display for RecordId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

pub trait Identified {
	fn id(&self) -> RecordId;
}
impl<T> Identified for &T
where
	T: Identified + ?Sized,
{
	fn id(&self) -> RecordId {
		(**self).id()
	}
}
impl Identified for RecordId {
	fn id(&self) -> RecordId {
		*self
	}
}
