pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Decode error: {message}")]
	Decode { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<vigil_storage::Error> for Error {
	fn from(err: vigil_storage::Error) -> Self {
		match err {
			vigil_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			vigil_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			vigil_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}

impl From<vigil_domain::Error> for Error {
	fn from(err: vigil_domain::Error) -> Self {
		Self::Decode { message: err.to_string() }
	}
}
