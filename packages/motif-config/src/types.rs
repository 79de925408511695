use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_WIKI_BASE: &str = "https://blueypedia.fandom.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	#[serde(default)]
	pub links: Links,
	#[serde(default)]
	pub suggestions: Suggestions,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	/// Base URL of the theme-search backend, without a trailing slash.
	#[serde(default = "default_api_base")]
	pub api_base: String,
	/// Per-request timeout applied to every backend call.
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// `EnvFilter` directive for the shell's tracing subscriber.
	#[serde(default = "default_log_level")]
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self {
			api_base: default_api_base(),
			timeout_ms: default_timeout_ms(),
			log_level: default_log_level(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Links {
	/// Episode URLs from the backend are relative to this site.
	#[serde(default = "default_wiki_base")]
	pub wiki_base: String,
}
impl Default for Links {
	fn default() -> Self {
		Self { wiki_base: default_wiki_base() }
	}
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Suggestions {
	#[serde(default)]
	pub themes: Vec<String>,
}

fn default_api_base() -> String {
	DEFAULT_API_BASE.to_string()
}

fn default_timeout_ms() -> u64 {
	DEFAULT_TIMEOUT_MS
}

fn default_log_level() -> String {
	DEFAULT_LOG_LEVEL.to_string()
}

fn default_wiki_base() -> String {
	DEFAULT_WIKI_BASE.to_string()
}
