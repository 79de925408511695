pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a backend call can fail.
///
/// Callers treat all variants alike and only surface the display text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Theme service is unreachable: {0}")]
	Network(#[source] reqwest::Error),
	#[error("Theme service returned {status}: {message}")]
	Backend { status: u16, message: String },
	#[error("Theme service sent an unreadable response: {message}")]
	Decode { message: String },
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("Theme request was interrupted: {message}")]
	Interrupted { message: String },
}
impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		if err.is_decode() {
			return Self::Decode { message: err.to_string() };
		}

		Self::Network(err)
	}
}
impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode { message: err.to_string() }
	}
}
