mod backend;
mod error;
mod fixtures;
mod scripted;

pub use backend::{FakeBackend, RecordedRequest, Reply};
pub use error::{Error, Result};
pub use fixtures::{
	SIBLING_CONFLICT_QUERY, TAKE_TURNS_ANSWER, backend_error, payload, sibling_conflict, theme,
};
pub use scripted::{ApiCall, ScriptedApi};

use std::{future::Future, time::Duration};

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Awaits `future`, failing the test instead of hanging when it stalls.
pub async fn within<F>(future: F) -> Result<F::Output>
where
	F: Future,
{
	tokio::time::timeout(WAIT_TIMEOUT, future)
		.await
		.map_err(|_| Error::Message(format!("Timed out after {WAIT_TIMEOUT:?}.")))
}
