pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Access denied: {message}")]
	AccessDenied { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("No pickup slot within {lookahead_days} days for district {district:?}.")]
	LookaheadExhausted { district: String, lookahead_days: u32 },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
impl From<recircle_storage::Error> for Error {
	fn from(err: recircle_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
