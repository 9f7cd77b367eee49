mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_MAX_FILTER_AND_SEARCH_PAGE, DEFAULT_MAX_PER_PAGE, DEFAULT_PER_PAGE,
	DEFAULT_SORT_ORDER, Filters, Pagination, Sorting,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		ParseFailure::Toml(source) => Error::ParseConfig { path: path.to_path_buf(), source },
		ParseFailure::Invalid(err) => err,
	})
}

pub fn from_toml_str(raw: &str) -> Result<Config> {
	parse(raw).map_err(|err| match err {
		ParseFailure::Toml(source) =>
			Error::ParseConfig { path: std::path::PathBuf::from("<inline>"), source },
		ParseFailure::Invalid(err) => err,
	})
}

pub fn validate(cfg: &Config) -> Result<()> {
	let pagination = &cfg.pagination;

	for (key, value) in [
		("pagination.default_per_page", pagination.default_per_page),
		("pagination.max_per_page", pagination.max_per_page),
		("pagination.max_filter_and_search_page", pagination.max_filter_and_search_page),
	] {
		if value == 0 {
			return Err(Error::invalid(key, "must be greater than zero."));
		}
	}

	if pagination.default_per_page > pagination.max_per_page {
		return Err(Error::invalid(
			"pagination.default_per_page",
			"must not exceed pagination.max_per_page.",
		));
	}

	let Some((name, direction)) = cfg.sorting.default_order.split_once(':') else {
		return Err(Error::invalid(
			"sorting.default_order",
			"must be formatted as <name>:<asc|desc>.",
		));
	};

	if name.trim().is_empty() {
		return Err(Error::invalid("sorting.default_order", "must name a sort order."));
	}
	if !matches!(direction, "asc" | "desc") {
		return Err(Error::invalid("sorting.default_order", "direction must be asc or desc."));
	}

	Ok(())
}

enum ParseFailure {
	Toml(toml::de::Error),
	Invalid(Error),
}

fn parse(raw: &str) -> Result<Config, ParseFailure> {
	let mut cfg: Config = toml::from_str(raw).map_err(ParseFailure::Toml)?;

	normalize(&mut cfg);

	validate(&cfg).map_err(ParseFailure::Invalid)?;

	Ok(cfg)
}

fn normalize(cfg: &mut Config) {
	let order = cfg.sorting.default_order.trim();

	cfg.sorting.default_order = match order.split_once(':') {
		Some((name, direction)) =>
			format!("{}:{}", name.trim(), direction.trim().to_ascii_lowercase()),
		None => order.to_string(),
	};
}
