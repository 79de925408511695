//! Client-side shape of a search response.

use motif_api::{SimilarTheme, SimilarThemesResponse};

#[derive(Clone, Debug, PartialEq)]
pub struct SemanticTheme {
	pub id: String,
	pub title: String,
	pub episode_title: String,
	/// Absolute link to the episode page, when the backend knows one.
	pub episode_link: Option<String>,
	pub description: String,
	pub explanation: String,
	pub quotes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
	pub theme: SemanticTheme,
	/// Opaque ranking signal; higher is more similar.
	pub score: f64,
	pub is_best_match: bool,
	/// Answer supplied together with the search response, if any.
	pub answer: Option<String>,
}
impl MatchResult {
	pub fn from_wire(raw: SimilarTheme, wiki_base: &str) -> Self {
		let SimilarTheme { theme, score, is_best_match, answer } = raw;

		Self {
			theme: SemanticTheme {
				episode_link: resolve_episode_url(wiki_base, &theme.episode_url),
				id: theme.semantic_id,
				title: theme.title,
				episode_title: theme.episode_title,
				description: theme.description,
				explanation: theme.explanation,
				quotes: theme.supporting_quotes,
			},
			score,
			is_best_match,
			answer: answer.filter(|text| !text.trim().is_empty()),
		}
	}

	pub fn id(&self) -> &str {
		&self.theme.id
	}

	pub fn display_score(&self) -> String {
		format!("{:.2}", self.score)
	}
}

/// Matches for one submitted query, best matches first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
	matches: Vec<MatchResult>,
}
impl ResultSet {
	pub fn from_response(payload: SimilarThemesResponse, wiki_base: &str) -> Self {
		let matches =
			payload.themes.into_iter().map(|raw| MatchResult::from_wire(raw, wiki_base)).collect();

		Self::from_matches(matches)
	}

	pub fn from_matches(mut matches: Vec<MatchResult>) -> Self {
		order_best_first(&mut matches);

		Self { matches }
	}

	pub fn matches(&self) -> &[MatchResult] {
		&self.matches
	}

	pub fn iter(&self) -> std::slice::Iter<'_, MatchResult> {
		self.matches.iter()
	}

	pub fn len(&self) -> usize {
		self.matches.len()
	}

	pub fn is_empty(&self) -> bool {
		self.matches.is_empty()
	}

	pub fn get(&self, match_id: &str) -> Option<&MatchResult> {
		self.matches.iter().find(|item| item.id() == match_id)
	}

	pub fn contains(&self, match_id: &str) -> bool {
		self.get(match_id).is_some()
	}

	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.matches.iter().map(MatchResult::id)
	}
}

/// Stable partition: best matches first, server order kept inside each group.
pub fn order_best_first(matches: &mut [MatchResult]) {
	matches.sort_by_key(|item| !item.is_best_match);
}

pub fn resolve_episode_url(wiki_base: &str, episode_url: &str) -> Option<String> {
	let path = episode_url.trim();

	if path.is_empty() {
		return None;
	}
	if path.starts_with("http://") || path.starts_with("https://") {
		return Some(path.to_string());
	}

	let base = wiki_base.trim_end_matches('/');

	if path.starts_with('/') {
		Some(format!("{base}{path}"))
	} else {
		Some(format!("{base}/{path}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const WIKI: &str = "https://blueypedia.fandom.com";

	fn ids(results: &ResultSet) -> Vec<&str> {
		results.ids().collect()
	}

	fn flagged(flags: &[(&str, bool)]) -> SimilarThemesResponse {
		motif_testkit::payload(
			flags
				.iter()
				.map(|(id, best)| motif_testkit::theme(id, id, *best, 0.5))
				.collect(),
		)
	}

	#[test]
	fn best_matches_precede_others_in_server_order() {
		let results = ResultSet::from_response(
			flagged(&[("a", false), ("b", true), ("c", false), ("d", true), ("e", false)]),
			WIKI,
		);

		assert_eq!(ids(&results), vec!["b", "d", "a", "c", "e"]);
	}

	#[test]
	fn ordering_is_idempotent() {
		let once = ResultSet::from_response(
			flagged(&[("a", false), ("b", true), ("c", true), ("d", false)]),
			WIKI,
		);
		let twice = ResultSet::from_matches(once.matches().to_vec());

		assert_eq!(once, twice);
	}

	#[test]
	fn ordering_ignores_score() {
		let results = ResultSet::from_response(
			motif_testkit::payload(vec![
				motif_testkit::theme("low", "Low", false, 0.1),
				motif_testkit::theme("high", "High", false, 0.9),
			]),
			WIKI,
		);

		assert_eq!(ids(&results), vec!["low", "high"]);
	}

	#[test]
	fn maps_wire_fields() {
		let mut raw = motif_testkit::theme("m1", "Fair Play", true, 0.912);

		raw.answer = Some("They take turns.".to_string());

		let item = MatchResult::from_wire(raw, WIKI);

		assert_eq!(item.id(), "m1");
		assert_eq!(item.theme.title, "Fair Play");
		assert_eq!(item.theme.episode_title, "Fair Play Episode");
		assert_eq!(
			item.theme.episode_link.as_deref(),
			Some("https://blueypedia.fandom.com/wiki/Fair_Play")
		);
		assert_eq!(item.theme.quotes, vec!["A quote about Fair Play.".to_string()]);
		assert_eq!(item.answer.as_deref(), Some("They take turns."));
		assert_eq!(item.display_score(), "0.91");
	}

	#[test]
	fn blank_supplied_answer_counts_as_absent() {
		let mut raw = motif_testkit::theme("m1", "Fair Play", true, 0.9);

		raw.answer = Some("  ".to_string());

		assert_eq!(MatchResult::from_wire(raw, WIKI).answer, None);
	}

	#[test]
	fn resolves_episode_urls() {
		assert_eq!(
			resolve_episode_url("https://blueypedia.fandom.com/", "/wiki/Keepy_Uppy").as_deref(),
			Some("https://blueypedia.fandom.com/wiki/Keepy_Uppy")
		);
		assert_eq!(
			resolve_episode_url(WIKI, "wiki/Keepy_Uppy").as_deref(),
			Some("https://blueypedia.fandom.com/wiki/Keepy_Uppy")
		);
		assert_eq!(
			resolve_episode_url(WIKI, "https://example.org/wiki/Camping").as_deref(),
			Some("https://example.org/wiki/Camping")
		);
		assert_eq!(resolve_episode_url(WIKI, ""), None);
	}

	#[test]
	fn empty_response_yields_empty_set() {
		let results = ResultSet::from_response(SimilarThemesResponse::default(), WIKI);

		assert!(results.is_empty());
		assert!(!results.contains("m1"));
	}
}
