pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Rejected user intents. None of these change session state.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Enter a theme to search for.")]
	EmptyQuery,
	#[error("There are no results to expand yet.")]
	NoResults,
	#[error("Unknown match {match_id}.")]
	UnknownMatch { match_id: String },
	#[error("The answer for {match_id} did not fail; nothing to retry.")]
	NotRetryable { match_id: String },
}
