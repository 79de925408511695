//! Which row is open, and the lazily fetched answer behind each row.

use std::collections::HashMap;

use crate::model::ResultSet;

static ABSENT: AnswerStatus = AnswerStatus::Absent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerStatus {
	Absent,
	Fetching,
	Present(String),
	FetchFailed(String),
}

/// Outcome of [`DisclosureState::toggle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
	Collapsed,
	/// `fetch` is set when the row had no answer and is now `Fetching`.
	Expanded { fetch: bool },
}

#[derive(Debug, Default)]
pub struct DisclosureState {
	expanded: Option<String>,
	answers: HashMap<String, AnswerStatus>,
}
impl DisclosureState {
	pub fn expanded(&self) -> Option<&str> {
		self.expanded.as_deref()
	}

	pub fn is_expanded(&self, match_id: &str) -> bool {
		self.expanded.as_deref() == Some(match_id)
	}

	pub fn answer(&self, match_id: &str) -> &AnswerStatus {
		self.answers.get(match_id).unwrap_or(&ABSENT)
	}

	pub fn clear(&mut self) {
		self.expanded = None;
		self.answers.clear();
	}

	/// Starts over for a freshly installed result set, seeding supplied answers.
	pub fn reset(&mut self, results: &ResultSet) {
		self.clear();

		for item in results.iter() {
			if let Some(answer) = &item.answer {
				self.answers.insert(item.id().to_string(), AnswerStatus::Present(answer.clone()));
			}
		}
	}

	pub fn toggle(&mut self, match_id: &str) -> Toggle {
		if self.is_expanded(match_id) {
			self.expanded = None;

			return Toggle::Collapsed;
		}

		self.expanded = Some(match_id.to_string());

		let fetch = matches!(self.answer(match_id), AnswerStatus::Absent);

		if fetch {
			self.answers.insert(match_id.to_string(), AnswerStatus::Fetching);
		}

		Toggle::Expanded { fetch }
	}

	/// Moves a failed answer back to `Fetching` and opens its row.
	pub fn retry(&mut self, match_id: &str) -> bool {
		if !matches!(self.answer(match_id), AnswerStatus::FetchFailed(_)) {
			return false;
		}

		self.expanded = Some(match_id.to_string());
		self.answers.insert(match_id.to_string(), AnswerStatus::Fetching);

		true
	}

	/// Records a finished fetch. Only a `Fetching` entry accepts it.
	pub fn resolve(&mut self, match_id: &str, outcome: Result<String, String>) -> bool {
		let Some(status) = self.answers.get_mut(match_id) else {
			return false;
		};

		if *status != AnswerStatus::Fetching {
			return false;
		}

		*status = match outcome {
			Ok(text) => AnswerStatus::Present(text),
			Err(message) => AnswerStatus::FetchFailed(message),
		};

		true
	}
}
