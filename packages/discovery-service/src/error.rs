pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<discovery_storage::Error> for Error {
	fn from(err: discovery_storage::Error) -> Self {
		match err {
			discovery_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			other => Self::Storage { message: other.to_string() },
		}
	}
}

impl From<discovery_providers::Error> for Error {
	fn from(err: discovery_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
