//! The session object handed to the presentation layer.
//!
//! [`Session`] is synchronous: intents return the [`Effect`] the caller must run, and
//! completions come back through [`Session::complete_search`] and
//! [`Session::complete_answer`]. Stale completions are recognised by their
//! [`SearchToken`] and dropped without touching visible state.

use motif_api::SimilarThemesResponse;

use crate::{
	Error, Result,
	disclosure::{AnswerStatus, DisclosureState, Toggle},
	model::ResultSet,
	search::{SearchState, SearchStatus, SearchToken},
};

/// Network work requested by a state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
	FindSimilar { token: SearchToken, query: String },
	FetchAnswer { token: SearchToken, query: String, match_id: String },
}

#[derive(Debug)]
pub struct Session {
	wiki_base: String,
	search: SearchState,
	disclosure: DisclosureState,
}
impl Session {
	pub fn new(wiki_base: impl Into<String>) -> Self {
		Self {
			wiki_base: wiki_base.into(),
			search: SearchState::default(),
			disclosure: DisclosureState::default(),
		}
	}

	pub fn set_query(&mut self, text: &str) {
		self.search.set_query(text);
	}

	pub fn current_query(&self) -> &str {
		self.search.current_query()
	}

	pub fn submitted_query(&self) -> Option<&str> {
		self.search.submitted_query()
	}

	pub fn status(&self) -> &SearchStatus {
		self.search.status()
	}

	pub fn results(&self) -> Option<&ResultSet> {
		self.search.status().results()
	}

	pub fn current_token(&self) -> Option<SearchToken> {
		self.search.current_token()
	}

	pub fn expanded(&self) -> Option<&str> {
		self.disclosure.expanded()
	}

	pub fn answer(&self, match_id: &str) -> &AnswerStatus {
		self.disclosure.answer(match_id)
	}

	pub fn submit(&mut self, query: &str) -> Result<Effect> {
		let (token, query) = self.search.begin(query)?;

		self.disclosure.clear();

		tracing::debug!(%token, query, "Search submitted.");

		Ok(Effect::FindSimilar { token, query })
	}

	/// Opens or closes a row. Opening a row without an answer requests one.
	pub fn toggle_expand(&mut self, match_id: &str) -> Result<Option<Effect>> {
		let (token, query) = self.held_match(match_id)?;

		match self.disclosure.toggle(match_id) {
			Toggle::Collapsed => {
				tracing::debug!(match_id, "Row collapsed.");

				Ok(None)
			},
			Toggle::Expanded { fetch: false } => {
				tracing::debug!(match_id, "Row expanded from cache.");

				Ok(None)
			},
			Toggle::Expanded { fetch: true } => {
				tracing::debug!(%token, match_id, "Row expanded; fetching answer.");

				Ok(Some(Effect::FetchAnswer { token, query, match_id: match_id.to_string() }))
			},
		}
	}

	/// Re-requests an answer whose previous fetch failed.
	pub fn retry_answer(&mut self, match_id: &str) -> Result<Effect> {
		let (token, query) = self.held_match(match_id)?;

		if !self.disclosure.retry(match_id) {
			return Err(Error::NotRetryable { match_id: match_id.to_string() });
		}

		tracing::debug!(%token, match_id, "Retrying answer.");

		Ok(Effect::FetchAnswer { token, query, match_id: match_id.to_string() })
	}

	/// Applies a search response. Returns `false` when the response was stale.
	pub fn complete_search(
		&mut self,
		token: SearchToken,
		outcome: motif_api::Result<SimilarThemesResponse>,
	) -> bool {
		if !self.search.accepts(token) {
			tracing::debug!(%token, "Discarded stale search response.");

			return false;
		}

		match outcome {
			Ok(payload) => {
				let results = ResultSet::from_response(payload, &self.wiki_base);

				self.disclosure.reset(&results);

				tracing::debug!(%token, matches = results.len(), "Search succeeded.");

				self.search.finish(token, Ok(results))
			},
			Err(err) => {
				tracing::warn!(%token, error = %err, "Search failed.");

				self.search.finish(token, Err(err.to_string()))
			},
		}
	}

	/// Applies an answer response. Returns `false` when the response was stale.
	pub fn complete_answer(
		&mut self,
		token: SearchToken,
		match_id: &str,
		outcome: motif_api::Result<String>,
	) -> bool {
		let current = self.search.current_token() == Some(token)
			&& self.results().is_some_and(|results| results.contains(match_id));

		if !current {
			tracing::debug!(%token, match_id, "Discarded stale answer response.");

			return false;
		}

		let outcome = outcome.map_err(|err| {
			tracing::warn!(%token, match_id, error = %err, "Answer fetch failed.");

			err.to_string()
		});

		self.disclosure.resolve(match_id, outcome)
	}

	fn held_match(&self, match_id: &str) -> Result<(SearchToken, String)> {
		let results = self.results().ok_or(Error::NoResults)?;

		if !results.contains(match_id) {
			return Err(Error::UnknownMatch { match_id: match_id.to_string() });
		}

		// A held result set implies an accepted submit, so both are present.
		match (self.search.current_token(), self.search.submitted_query()) {
			(Some(token), Some(query)) => Ok((token, query.to_string())),
			_ => Err(Error::NoResults),
		}
	}
}
