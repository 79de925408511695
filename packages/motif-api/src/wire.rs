use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindSimilarRequest {
	pub theme: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
	pub theme: String,
	pub similar_theme_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarThemesResponse {
	#[serde(default, deserialize_with = "null_as_default")]
	pub themes: Vec<SimilarTheme>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarTheme {
	pub theme: ThemeRecord,
	pub score: f64,
	#[serde(default, deserialize_with = "null_as_default")]
	pub is_best_match: bool,
	/// Some backends answer eagerly during search; others leave this out.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub answer: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRecord {
	pub semantic_id: String,
	pub title: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub episode_title: String,
	/// Relative to the wiki site, e.g. `/wiki/Keepy_Uppy`. May be empty.
	#[serde(default, deserialize_with = "null_as_default")]
	pub episode_url: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub description: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub explanation: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub supporting_quotes: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_backend_payload() {
		let json = serde_json::json!({
			"themes": [
				{
					"theme": {
						"episode_title": "Keepy Uppy",
						"episode_url": "/wiki/Keepy_Uppy",
						"semantic_id": "Theme:Episode:Keepy_Uppy:Teamwork",
						"title": "Teamwork",
						"description": "Working together.",
						"explanation": "The family keeps the balloon up.",
						"supporting_quotes": ["Keepy uppy!", "Don't let it touch the ground!"]
					},
					"score": 0.83,
					"is_best_match": true,
					"answer": "They cooperate."
				}
			]
		});
		let parsed: SimilarThemesResponse = serde_json::from_value(json).expect("parse failed");
		let first = &parsed.themes[0];

		assert_eq!(first.theme.semantic_id, "Theme:Episode:Keepy_Uppy:Teamwork");
		assert_eq!(first.theme.supporting_quotes.len(), 2);
		assert!(first.is_best_match);
		assert_eq!(first.answer.as_deref(), Some("They cooperate."));
	}

	#[test]
	fn tolerates_missing_and_null_optional_fields() {
		let json = serde_json::json!({
			"themes": [
				{
					"theme": {
						"semantic_id": "m1",
						"title": "Fair Play",
						"description": null,
						"supporting_quotes": null
					},
					"score": 0.5,
					"is_best_match": null,
					"answer": null
				}
			]
		});
		let parsed: SimilarThemesResponse = serde_json::from_value(json).expect("parse failed");
		let first = &parsed.themes[0];

		assert_eq!(first.theme.episode_url, "");
		assert_eq!(first.theme.description, "");
		assert!(first.theme.supporting_quotes.is_empty());
		assert!(!first.is_best_match);
		assert_eq!(first.answer, None);
	}

	#[test]
	fn null_theme_list_is_empty() {
		let parsed: SimilarThemesResponse =
			serde_json::from_str(r#"{"themes": null}"#).expect("parse failed");

		assert!(parsed.themes.is_empty());
	}

	#[test]
	fn answer_request_uses_backend_field_names() {
		let body = serde_json::to_value(AnswerRequest {
			theme: "sibling conflict".to_string(),
			similar_theme_id: "m2".to_string(),
		})
		.expect("serialize failed");

		assert_eq!(body, serde_json::json!({ "theme": "sibling conflict", "similar_theme_id": "m2" }));
	}
}
