pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Configuration error: {message}")]
	Configuration { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Search error: {message}")]
	Search { message: String },
	#[error(transparent)]
	Config(#[from] prism_config::Error),
}
impl From<prism_presenter::Error> for Error {
	fn from(err: prism_presenter::Error) -> Self {
		match err {
			prism_presenter::Error::Configuration { message } => Self::Configuration { message },
			prism_presenter::Error::Storage { message } => Self::Storage { message },
		}
	}
}

impl From<prism_query::Error> for Error {
	fn from(err: prism_query::Error) -> Self {
		match err {
			prism_query::Error::Configuration { message } => Self::Configuration { message },
			prism_query::Error::Storage { message } => Self::Storage { message },
			prism_query::Error::Search { message } => Self::Search { message },
		}
	}
}
