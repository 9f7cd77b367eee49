pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Configuration error: {message}")]
	Configuration { message: String },
	/// Raised by lookup closures and preload hooks that talk to storage.
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	pub(crate) fn configuration(message: impl Into<String>) -> Self {
		Self::Configuration { message: message.into() }
	}
}
