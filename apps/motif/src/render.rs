//! Plain-text rendering of the session for the terminal shell.

use std::fmt::{self, Display, Formatter};

use motif_session::{AnswerStatus, MatchResult, ResultSet, SearchStatus, Session};

pub const HELP: &str = "\
Type a theme and press enter to search.
  /TEXT      search for TEXT literally, e.g. /42 or /:q
  N | :o N   open or close result N
  :r N       retry a failed answer for result N
  :s N       search for suggestion N
  :l         list suggestions
  :h         show this help
  :q         quit";

/// Everything the shell shows after a state change.
pub struct SessionView<'a> {
	pub session: &'a Session,
	pub suggestions: &'a [String],
}
impl Display for SessionView<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.session.status() {
			SearchStatus::Idle => {
				writeln!(f, "An episode exploring the theme of ...")?;

				if !self.suggestions.is_empty() {
					write!(f, "{}", Suggestions(self.suggestions))?;
				}

				Ok(())
			},
			SearchStatus::Pending => writeln!(
				f,
				"Searching for {:?} ...",
				self.session.submitted_query().unwrap_or_default()
			),
			SearchStatus::Failed(message) => writeln!(f, "error: {message}"),
			SearchStatus::Succeeded(results) => write_results(f, self.session, results),
		}
	}
}

pub struct Suggestions<'a>(pub &'a [String]);
impl Display for Suggestions<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return writeln!(f, "No suggestions configured.");
		}

		writeln!(f, "Try one of:")?;

		for (index, theme) in self.0.iter().enumerate() {
			writeln!(f, "  :s {}  {theme}", index + 1)?;
		}

		Ok(())
	}
}

fn write_results(f: &mut Formatter<'_>, session: &Session, results: &ResultSet) -> fmt::Result {
	if results.is_empty() {
		return writeln!(
			f,
			"No episodes matched {:?}.",
			session.submitted_query().unwrap_or_default()
		);
	}

	for (index, item) in results.iter().enumerate() {
		let row = index + 1;
		let expanded = session.expanded() == Some(item.id());
		let marker = if expanded { 'v' } else { '>' };
		let badge = if item.is_best_match { "  [Best Match]" } else { "" };

		writeln!(f, "{marker} {row}. {}{badge}", item.theme.title)?;
		writeln!(f, "     {} | Score: {}", item.theme.episode_title, item.display_score())?;

		if expanded {
			write_detail(f, row, item, session.answer(item.id()))?;
		}
	}

	Ok(())
}

fn write_detail(
	f: &mut Formatter<'_>,
	row: usize,
	item: &MatchResult,
	answer: &AnswerStatus,
) -> fmt::Result {
	match answer {
		AnswerStatus::Absent => {},
		AnswerStatus::Fetching => writeln!(f, "     Fetching answer ...")?,
		AnswerStatus::Present(text) => writeln!(f, "     {text}")?,
		AnswerStatus::FetchFailed(message) =>
			writeln!(f, "     Answer unavailable: {message} (:r {row} to retry)")?,
	}

	writeln!(f, "     ----")?;
	writeln!(f, "     Description: {}", item.theme.description)?;
	writeln!(f, "     Explanation: {}", item.theme.explanation)?;

	if !item.theme.quotes.is_empty() {
		writeln!(f, "     Supporting Quotes:")?;

		for quote in &item.theme.quotes {
			writeln!(f, "       \"{quote}\"")?;
		}
	}
	if let Some(link) = &item.theme.episode_link {
		writeln!(f, "     Episode: {link}")?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	use motif_session::{Effect, SearchToken};

	fn loaded() -> (Session, SearchToken) {
		let mut session = Session::new("https://blueypedia.fandom.com");
		let Ok(Effect::FindSimilar { token, .. }) = session.submit("sibling conflict") else {
			panic!("Expected a find effect.");
		};

		session.complete_search(token, Ok(motif_testkit::sibling_conflict()));

		(session, token)
	}

	fn view(session: &Session) -> String {
		SessionView { session, suggestions: &[] }.to_string()
	}

	#[test]
	fn idle_view_lists_suggestions() {
		let session = Session::new("https://blueypedia.fandom.com");
		let suggestions = vec!["sibling conflict".to_string()];
		let text = SessionView { session: &session, suggestions: &suggestions }.to_string();

		assert!(text.contains(":s 1  sibling conflict"), "Unexpected view: {text}");
	}

	#[test]
	fn collapsed_rows_show_badge_and_score() {
		let (session, _) = loaded();
		let text = view(&session);

		assert!(text.contains("> 1. Fair Play  [Best Match]"), "Unexpected view: {text}");
		assert!(text.contains("Fair Play Episode | Score: 0.91"), "Unexpected view: {text}");
		assert!(text.contains("> 2. Sharing\n"), "Unexpected view: {text}");
		assert!(!text.contains("Description:"), "Unexpected view: {text}");
	}

	#[test]
	fn expanded_row_shows_answer_and_detail() {
		let (mut session, token) = loaded();

		session.toggle_expand("m2").expect("toggle failed");

		assert!(view(&session).contains("Fetching answer ..."));

		session.complete_answer(token, "m2", Ok(motif_testkit::TAKE_TURNS_ANSWER.to_string()));

		let text = view(&session);

		assert!(text.contains("v 2. Sharing"), "Unexpected view: {text}");
		assert!(text.contains(motif_testkit::TAKE_TURNS_ANSWER), "Unexpected view: {text}");
		assert!(text.contains("\"A quote about Sharing.\""), "Unexpected view: {text}");
		assert!(
			text.contains("Episode: https://blueypedia.fandom.com/wiki/Sharing"),
			"Unexpected view: {text}"
		);
	}

	#[test]
	fn failed_answer_offers_retry() {
		let (mut session, token) = loaded();

		session.toggle_expand("m1").expect("toggle failed");
		session.complete_answer(token, "m1", Err(motif_testkit::backend_error(502, "LLM down")));

		let text = view(&session);

		assert!(text.contains("(:r 1 to retry)"), "Unexpected view: {text}");
	}

	#[test]
	fn failed_search_shows_banner() {
		let mut session = Session::new("https://blueypedia.fandom.com");
		let Ok(Effect::FindSimilar { token, .. }) = session.submit("x") else {
			panic!("Expected a find effect.");
		};

		session.complete_search(token, Err(motif_testkit::backend_error(500, "Graph offline")));

		assert_eq!(view(&session), "error: Theme service returned 500: Graph offline\n");
	}
}
