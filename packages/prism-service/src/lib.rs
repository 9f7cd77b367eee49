pub mod page;
pub mod selection;

mod error;

pub use error::{Error, Result};
pub use page::{PageMeta, PresentedPage};
pub use selection::selection_from_params;

use std::path::Path;

use prism_config::Config;

pub struct PrismService {
	pub cfg: Config,
}
impl PrismService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg }
	}

	pub fn load(path: &Path) -> Result<Self> {
		let cfg = prism_config::load(path)?;

		tracing::debug!(path = %path.display(), "Loaded service configuration.");

		Ok(Self::new(cfg))
	}
}
