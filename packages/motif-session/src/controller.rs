//! Runs session effects on the tokio runtime and feeds their results back.
//!
//! Requests run as spawned tasks and report over a channel; only the owner of the
//! [`Controller`] mutates the session, one completion at a time.

use std::sync::Arc;

use tokio::{
	sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
	task::{JoinError, JoinHandle},
};

use motif_api::{SimilarThemesResponse, ThemeApi};

use crate::{
	Result,
	search::SearchToken,
	session::{Effect, Session},
};

#[derive(Debug)]
pub enum Completion {
	Search {
		token: SearchToken,
		outcome: motif_api::Result<SimilarThemesResponse>,
	},
	Answer {
		token: SearchToken,
		match_id: String,
		outcome: motif_api::Result<String>,
	},
}

pub struct Controller {
	session: Session,
	api: Arc<dyn ThemeApi>,
	tx: UnboundedSender<Completion>,
	rx: UnboundedReceiver<Completion>,
	in_flight: usize,
}
impl Controller {
	pub fn new(session: Session, api: Arc<dyn ThemeApi>) -> Self {
		let (tx, rx) = mpsc::unbounded_channel();

		Self { session, api, tx, rx, in_flight: 0 }
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Number of requests whose completion has not been received yet.
	pub fn in_flight(&self) -> usize {
		self.in_flight
	}

	pub fn set_query(&mut self, text: &str) {
		self.session.set_query(text);
	}

	pub fn submit(&mut self, query: &str) -> Result<SearchToken> {
		let effect = self.session.submit(query)?;
		let token = match &effect {
			Effect::FindSimilar { token, .. } | Effect::FetchAnswer { token, .. } => *token,
		};

		self.dispatch(effect);

		Ok(token)
	}

	pub fn toggle_expand(&mut self, match_id: &str) -> Result<()> {
		if let Some(effect) = self.session.toggle_expand(match_id)? {
			self.dispatch(effect);
		}

		Ok(())
	}

	pub fn retry_answer(&mut self, match_id: &str) -> Result<()> {
		let effect = self.session.retry_answer(match_id)?;

		self.dispatch(effect);

		Ok(())
	}

	/// Waits for the next finished request. Returns `None` when nothing is in flight.
	pub async fn next_completion(&mut self) -> Option<Completion> {
		if self.in_flight == 0 {
			return None;
		}

		let completion = self.rx.recv().await?;

		self.in_flight -= 1;

		Some(completion)
	}

	/// Applies a completion. Returns whether visible state changed.
	pub fn apply(&mut self, completion: Completion) -> bool {
		match completion {
			Completion::Search { token, outcome } => self.session.complete_search(token, outcome),
			Completion::Answer { token, match_id, outcome } =>
				self.session.complete_answer(token, &match_id, outcome),
		}
	}

	/// Receives and applies one completion.
	pub async fn step(&mut self) -> Option<bool> {
		let completion = self.next_completion().await?;

		Some(self.apply(completion))
	}

	/// Drives every outstanding request to completion.
	pub async fn settle(&mut self) {
		while self.step().await.is_some() {}
	}

	fn dispatch(&mut self, effect: Effect) {
		let api = self.api.clone();
		let tx = self.tx.clone();

		self.in_flight += 1;

		// The request runs in its own task so a panic still yields a completion.
		match effect {
			Effect::FindSimilar { token, query } => {
				let request = tokio::spawn(async move { api.find_similar_themes(&query).await });

				tokio::spawn(async move {
					let outcome = joined(request).await;
					let _ = tx.send(Completion::Search { token, outcome });
				});
			},
			Effect::FetchAnswer { token, query, match_id } => {
				let id = match_id.clone();
				let request = tokio::spawn(async move { api.fetch_answer(&query, &id).await });

				tokio::spawn(async move {
					let outcome = joined(request).await;
					let _ = tx.send(Completion::Answer { token, match_id, outcome });
				});
			},
		}
	}
}

async fn joined<T>(request: JoinHandle<motif_api::Result<T>>) -> motif_api::Result<T> {
	request.await.unwrap_or_else(|err| Err(interrupted(err)))
}

fn interrupted(err: JoinError) -> motif_api::Error {
	tracing::error!(error = %err, "Theme request task failed.");

	let message = if err.is_panic() { "request task panicked" } else { "request task was cancelled" };

	motif_api::Error::Interrupted { message: message.to_string() }
}
