pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Storage and search failures are produced by collaborator implementations and pass through
/// the composer untouched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Configuration error: {message}")]
	Configuration { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Search error: {message}")]
	Search { message: String },
}
