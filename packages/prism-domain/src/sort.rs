use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
	#[default]
	Asc,
	Desc,
}
impl SortDirection {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}

	/// Only `asc` and `desc` are accepted, ignoring case and surrounding whitespace.
	pub fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim();

		if raw.eq_ignore_ascii_case("asc") {
			Some(Self::Asc)
		} else if raw.eq_ignore_ascii_case("desc") {
			Some(Self::Desc)
		} else {
			None
		}
	}

	/// Anything outside the allow-list reads as ascending.
	pub fn parse_or_asc(raw: &str) -> Self {
		Self::parse(raw).unwrap_or(Self::Asc)
	}
}

/// A named sort order paired with a direction, as written in `order=<name>:<direction>`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortSpec {
	pub name: String,
	pub direction: SortDirection,
}
impl SortSpec {
	pub fn new(name: impl Into<String>, direction: SortDirection) -> Self {
		Self { name: name.into(), direction }
	}

	/// Returns `None` when the name part is blank. A missing or unknown direction reads as
	/// ascending.
	pub fn parse(raw: &str) -> Option<Self> {
		let (name, direction) = match raw.split_once(':') {
			Some((name, direction)) => (name.trim(), SortDirection::parse_or_asc(direction)),
			None => (raw.trim(), SortDirection::Asc),
		};

		if name.is_empty() {
			return None;
		}

		Some(Self::new(name, direction))
	}
}
