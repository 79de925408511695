//! Search lifecycle: the editable query, the submitted query and the request status.

use std::fmt;

use crate::{Error, Result, model::ResultSet};

/// Tags one issued search. Later submits always carry larger tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchToken(u64);
impl SearchToken {
	fn next(self) -> Self {
		Self(self.0 + 1)
	}
}
impl fmt::Display for SearchToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SearchStatus {
	#[default]
	Idle,
	Pending,
	Succeeded(ResultSet),
	Failed(String),
}
impl SearchStatus {
	pub fn results(&self) -> Option<&ResultSet> {
		match self {
			Self::Succeeded(results) => Some(results),
			_ => None,
		}
	}

	pub fn is_pending(&self) -> bool {
		matches!(self, Self::Pending)
	}
}

#[derive(Debug, Default)]
pub struct SearchState {
	query: String,
	submitted: Option<String>,
	status: SearchStatus,
	issued: SearchToken,
	current: Option<SearchToken>,
}
impl SearchState {
	pub fn set_query(&mut self, text: &str) {
		self.query.clear();
		self.query.push_str(text);
	}

	pub fn current_query(&self) -> &str {
		&self.query
	}

	/// The trimmed query of the most recent accepted submit.
	pub fn submitted_query(&self) -> Option<&str> {
		self.submitted.as_deref()
	}

	pub fn status(&self) -> &SearchStatus {
		&self.status
	}

	pub fn current_token(&self) -> Option<SearchToken> {
		self.current
	}

	/// Validates and freezes `query`, moving to `Pending` under a fresh token.
	pub fn begin(&mut self, query: &str) -> Result<(SearchToken, String)> {
		let trimmed = query.trim();

		if trimmed.is_empty() {
			return Err(Error::EmptyQuery);
		}

		let token = self.issued.next();

		self.issued = token;
		self.current = Some(token);
		self.set_query(query);
		self.submitted = Some(trimmed.to_string());
		self.status = SearchStatus::Pending;

		Ok((token, trimmed.to_string()))
	}

	/// Whether a completion tagged with `token` may still change the status.
	pub fn accepts(&self, token: SearchToken) -> bool {
		self.current == Some(token) && self.status.is_pending()
	}

	/// Installs the outcome of the current search. Stale tokens are ignored.
	pub fn finish(&mut self, token: SearchToken, outcome: Result<ResultSet, String>) -> bool {
		if !self.accepts(token) {
			return false;
		}

		self.status = match outcome {
			Ok(results) => SearchStatus::Succeeded(results),
			Err(message) => SearchStatus::Failed(message),
		};

		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_query_is_rejected_without_state_change() {
		let mut search = SearchState::default();

		search.set_query("draft");

		for query in ["", "   ", "\t\n"] {
			assert_eq!(search.begin(query), Err(Error::EmptyQuery));
		}

		assert_eq!(search.status(), &SearchStatus::Idle);
		assert_eq!(search.current_query(), "draft");
		assert_eq!(search.submitted_query(), None);
		assert_eq!(search.current_token(), None);
	}

	#[test]
	fn begin_freezes_trimmed_query_and_goes_pending() {
		let mut search = SearchState::default();
		let (token, query) = search.begin("  sibling conflict ").expect("begin failed");

		assert_eq!(query, "sibling conflict");
		assert_eq!(search.submitted_query(), Some("sibling conflict"));
		assert_eq!(search.current_query(), "  sibling conflict ");
		assert_eq!(search.status(), &SearchStatus::Pending);
		assert_eq!(search.current_token(), Some(token));
	}

	#[test]
	fn tokens_increase_per_submit() {
		let mut search = SearchState::default();
		let (first, _) = search.begin("a").expect("begin failed");
		let (second, _) = search.begin("b").expect("begin failed");

		assert!(second > first);
		assert!(!search.accepts(first));
		assert!(search.accepts(second));
	}

	#[test]
	fn stale_token_cannot_finish() {
		let mut search = SearchState::default();
		let (first, _) = search.begin("a").expect("begin failed");
		let (second, _) = search.begin("b").expect("begin failed");

		assert!(!search.finish(first, Err("late".to_string())));
		assert_eq!(search.status(), &SearchStatus::Pending);
		assert!(search.finish(second, Ok(ResultSet::default())));
		assert_eq!(search.status(), &SearchStatus::Succeeded(ResultSet::default()));
	}

	#[test]
	fn finished_search_cannot_finish_twice() {
		let mut search = SearchState::default();
		let (token, _) = search.begin("a").expect("begin failed");

		assert!(search.finish(token, Err("boom".to_string())));
		assert!(!search.finish(token, Ok(ResultSet::default())));
		assert_eq!(search.status(), &SearchStatus::Failed("boom".to_string()));
	}

	#[test]
	fn resubmit_after_failure_goes_pending_again() {
		let mut search = SearchState::default();
		let (token, _) = search.begin("a").expect("begin failed");

		search.finish(token, Err("boom".to_string()));
		search.begin("a").expect("begin failed");

		assert!(search.status().is_pending());
	}
}
