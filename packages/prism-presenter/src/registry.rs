use std::collections::BTreeMap;

use crate::{Error, Result};

pub const ROOT_NAMESPACE: &str = "root";

const PRESENTER_SUFFIX: &str = "Presenter";

/// Collects presenters during startup. `build` freezes them into a [`PresenterRegistry`].
#[derive(Debug)]
pub struct RegistryBuilder<P> {
	entries: BTreeMap<String, BTreeMap<String, P>>,
}
impl<P> RegistryBuilder<P> {
	pub fn new() -> Self {
		Self { entries: BTreeMap::new() }
	}

	pub fn register(mut self, namespace: &str, entity: &str, presenter: P) -> Result<Self> {
		let namespace = namespace.trim();
		let entity = entity.trim();

		if namespace.is_empty() || entity.is_empty() {
			return Err(Error::configuration(
				"Presenter registration requires a namespace and an entity name.",
			));
		}

		let entities = self.entries.entry(namespace.to_string()).or_default();

		if entities.contains_key(entity) {
			return Err(Error::configuration(format!(
				"A presenter for {namespace}/{entity} is already registered."
			)));
		}

		entities.insert(entity.to_string(), presenter);

		Ok(self)
	}

	/// Registers under a path such as `api::v1::WidgetPresenter`: the namespace is the
	/// lowercased parent segment (`root` when there is none) and the entity is the type name
	/// without its `Presenter` suffix.
	pub fn register_type_path(self, path: &str, presenter: P) -> Result<Self> {
		let segments: Vec<&str> =
			path.split("::").map(str::trim).filter(|segment| !segment.is_empty()).collect();
		let Some((type_name, parents)) = segments.split_last() else {
			return Err(Error::configuration("Presenter type path must not be empty."));
		};
		let entity = match type_name.strip_suffix(PRESENTER_SUFFIX) {
			Some(entity) if !entity.is_empty() => entity,
			_ => {
				return Err(Error::configuration(format!(
					"Presenter type names must end in {PRESENTER_SUFFIX}; got '{type_name}'."
				)));
			},
		};
		let namespace = parents
			.last()
			.map(|parent| parent.to_lowercase())
			.unwrap_or_else(|| ROOT_NAMESPACE.to_string());

		self.register(&namespace, entity, presenter)
	}

	pub fn build(self) -> PresenterRegistry<P> {
		PresenterRegistry { entries: self.entries }
	}
}
impl<P> Default for RegistryBuilder<P> {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable presenter table keyed by namespace and entity name.
#[derive(Debug)]
pub struct PresenterRegistry<P> {
	entries: BTreeMap<String, BTreeMap<String, P>>,
}
impl<P> PresenterRegistry<P> {
	pub fn builder() -> RegistryBuilder<P> {
		RegistryBuilder::new()
	}

	pub fn get(&self, namespace: &str, entity: &str) -> Option<&P> {
		self.entries.get(namespace).and_then(|entities| entities.get(entity))
	}

	pub fn namespaces(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn entities(&self, namespace: &str) -> impl Iterator<Item = (&str, &P)> {
		self.entries
			.get(namespace)
			.into_iter()
			.flat_map(|entities| entities.iter())
			.map(|(name, presenter)| (name.as_str(), presenter))
	}

	pub fn len(&self) -> usize {
		self.entries.values().map(BTreeMap::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
