use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::{AnswerRequest, Error, FindSimilarRequest, Result, SimilarThemesResponse};

pub const FIND_SIMILAR_PATH: &str = "/themes/find_similar";
pub const ANSWER_PATH: &str = "/themes/answer";
pub const HEALTH_PATH: &str = "/";

/// reqwest-backed client for the theme-search backend.
#[derive(Clone, Debug)]
pub struct HttpThemeApi {
	api_base: String,
	client: Client,
}
impl HttpThemeApi {
	pub fn new(cfg: &motif_config::Service) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()
			.map_err(|err| Error::InvalidConfig {
				message: format!("Failed to build HTTP client: {err}"),
			})?;

		Ok(Self { api_base: cfg.api_base.trim_end_matches('/').to_string(), client })
	}

	pub fn api_base(&self) -> &str {
		&self.api_base
	}

	pub async fn find_similar_themes(&self, theme: &str) -> Result<SimilarThemesResponse> {
		let url = format!("{}{}", self.api_base, FIND_SIMILAR_PATH);
		let body = FindSimilarRequest { theme: theme.to_string() };

		tracing::debug!(%url, theme, "Requesting similar themes.");

		let response = self.client.post(url).json(&body).send().await?;
		let bytes = success_body(response).await?;

		Ok(serde_json::from_slice(&bytes)?)
	}

	pub async fn fetch_answer(&self, theme: &str, similar_theme_id: &str) -> Result<String> {
		let url = format!("{}{}", self.api_base, ANSWER_PATH);
		let body = AnswerRequest {
			theme: theme.to_string(),
			similar_theme_id: similar_theme_id.to_string(),
		};

		tracing::debug!(%url, theme, similar_theme_id, "Requesting theme answer.");

		let response = self.client.post(url).json(&body).send().await?;
		let bytes = success_body(response).await?;

		parse_answer(&bytes)
	}

	pub async fn health(&self) -> Result<()> {
		let url = format!("{}{}", self.api_base, HEALTH_PATH);
		let response = self.client.get(url).send().await?;

		success_body(response).await?;

		Ok(())
	}
}

async fn success_body(response: Response) -> Result<Vec<u8>> {
	let status = response.status();
	let bytes = response.bytes().await?;

	if status.is_success() {
		return Ok(bytes.to_vec());
	}

	Err(Error::Backend { status: status.as_u16(), message: backend_message(status, &bytes) })
}

fn backend_message(status: StatusCode, bytes: &[u8]) -> String {
	let raw = || String::from_utf8_lossy(bytes).trim().to_string();
	let message = match serde_json::from_slice::<Value>(bytes) {
		Ok(Value::Object(map)) => match map.get("detail").or_else(|| map.get("message")) {
			Some(Value::String(text)) => text.clone(),
			Some(other) => other.to_string(),
			None => raw(),
		},
		Ok(Value::String(text)) => text,
		_ => raw(),
	};

	if message.trim().is_empty() {
		return status.canonical_reason().unwrap_or("Request failed").to_string();
	}

	message
}

// The backend encodes the answer as a JSON string; plain text bodies are used verbatim.
fn parse_answer(bytes: &[u8]) -> Result<String> {
	match serde_json::from_slice::<Value>(bytes) {
		Ok(Value::String(text)) => Ok(text),
		Ok(Value::Null | Value::Array(_) | Value::Object(_)) => {
			Err(Error::Decode { message: "Answer response must be a string.".to_string() })
		},
		Ok(other) => Ok(other.to_string()),
		Err(_) => Ok(String::from_utf8_lossy(bytes).trim().to_string()),
	}
}
