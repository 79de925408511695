use std::sync::{Mutex, MutexGuard};

use tokio::sync::{Notify, oneshot};

use motif_api::{BoxFuture, SimilarThemesResponse, ThemeApi};

struct Pending<T> {
	key: String,
	sender: Option<oneshot::Sender<motif_api::Result<T>>>,
}
impl<T> Pending<T> {
	fn new(key: &str, sender: oneshot::Sender<motif_api::Result<T>>) -> Self {
		Self { key: key.to_string(), sender: Some(sender) }
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
	FindSimilar { theme: String },
	Answer { theme: String, similar_theme_id: String },
}

#[derive(Default)]
struct ScriptState {
	calls: Vec<ApiCall>,
	finds: Vec<Pending<SimilarThemesResponse>>,
	answers: Vec<Pending<String>>,
}

/// A [`ThemeApi`] whose calls stay pending until the test resolves them, in any order.
#[derive(Default)]
pub struct ScriptedApi {
	state: Mutex<ScriptState>,
	changed: Notify,
}
impl ScriptedApi {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn calls(&self) -> Vec<ApiCall> {
		self.lock().calls.clone()
	}

	pub fn answer_calls(&self) -> usize {
		self.lock().answers.len()
	}

	/// Waits until at least `count` calls of any kind were issued.
	pub async fn wait_for_calls(&self, count: usize) {
		loop {
			if self.lock().calls.len() >= count {
				return;
			}

			self.changed.notified().await;
		}
	}

	/// Resolves the oldest open find call for `theme`. Returns `false` when none is open.
	pub fn resolve_find(
		&self,
		theme: &str,
		outcome: motif_api::Result<SimilarThemesResponse>,
	) -> bool {
		let sender = take_open(&mut self.lock().finds, theme);

		sender.map(|sender| sender.send(outcome).is_ok()).unwrap_or(false)
	}

	/// Resolves the oldest open answer call for `match_id`. Returns `false` when none is open.
	pub fn resolve_answer(&self, match_id: &str, outcome: motif_api::Result<String>) -> bool {
		let sender = take_open(&mut self.lock().answers, match_id);

		sender.map(|sender| sender.send(outcome).is_ok()).unwrap_or(false)
	}

	fn lock(&self) -> MutexGuard<'_, ScriptState> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl ThemeApi for ScriptedApi {
	fn find_similar_themes<'a>(
		&'a self,
		theme: &'a str,
	) -> BoxFuture<'a, motif_api::Result<SimilarThemesResponse>> {
		let (tx, rx) = oneshot::channel();

		{
			let mut state = self.lock();

			state.calls.push(ApiCall::FindSimilar { theme: theme.to_string() });
			state.finds.push(Pending::new(theme, tx));
		}

		self.changed.notify_one();

		Box::pin(async move { rx.await.unwrap_or_else(|_| Err(dropped())) })
	}

	fn fetch_answer<'a>(
		&'a self,
		theme: &'a str,
		similar_theme_id: &'a str,
	) -> BoxFuture<'a, motif_api::Result<String>> {
		let (tx, rx) = oneshot::channel();

		{
			let mut state = self.lock();

			state.calls.push(ApiCall::Answer {
				theme: theme.to_string(),
				similar_theme_id: similar_theme_id.to_string(),
			});
			state.answers.push(Pending::new(similar_theme_id, tx));
		}

		self.changed.notify_one();

		Box::pin(async move { rx.await.unwrap_or_else(|_| Err(dropped())) })
	}
}

fn take_open<T>(
	pending: &mut [Pending<T>],
	key: &str,
) -> Option<oneshot::Sender<motif_api::Result<T>>> {
	pending.iter_mut().filter(|call| call.key == key).find_map(|call| call.sender.take())
}

fn dropped() -> motif_api::Error {
	motif_api::Error::Backend { status: 503, message: "Scripted call was dropped.".to_string() }
}
