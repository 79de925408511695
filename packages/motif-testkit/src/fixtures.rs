use motif_api::{SimilarTheme, SimilarThemesResponse, ThemeRecord};

pub const SIBLING_CONFLICT_QUERY: &str = "sibling conflict";
pub const TAKE_TURNS_ANSWER: &str = "Bluey and Bingo learn to take turns.";

pub fn theme(id: &str, title: &str, is_best_match: bool, score: f64) -> SimilarTheme {
	SimilarTheme {
		theme: ThemeRecord {
			semantic_id: id.to_string(),
			title: title.to_string(),
			episode_title: format!("{title} Episode"),
			episode_url: format!("/wiki/{}", title.replace(' ', "_")),
			description: format!("{title} description."),
			explanation: format!("{title} explanation."),
			supporting_quotes: vec![format!("A quote about {title}.")],
		},
		score,
		is_best_match,
		answer: None,
	}
}

pub fn payload(themes: Vec<SimilarTheme>) -> SimilarThemesResponse {
	SimilarThemesResponse { themes }
}

/// Two matches for "sibling conflict": best match `m1`, then `m2`, no eager answers.
pub fn sibling_conflict() -> SimilarThemesResponse {
	payload(vec![theme("m1", "Fair Play", true, 0.91), theme("m2", "Sharing", false, 0.77)])
}

pub fn backend_error(status: u16, message: &str) -> motif_api::Error {
	motif_api::Error::Backend { status, message: message.to_string() }
}
