mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_API_BASE, DEFAULT_LOG_LEVEL, DEFAULT_TIMEOUT_MS, DEFAULT_WIKI_BASE, Links,
	Service, Suggestions,
};

use std::{fs, path::Path};

/// Reads a TOML file, fills in defaults for omitted sections, and validates the result.
pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|source| Error::ReadConfig { path: path.to_path_buf(), source })?;
	let mut cfg = toml::from_str::<Config>(&raw)
		.map_err(|source| Error::ParseConfig { path: path.to_path_buf(), source })?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

/// Built-in configuration used when no file is given.
pub fn defaults() -> Config {
	let mut cfg = Config::default();

	normalize(&mut cfg);

	cfg
}

pub fn validate(cfg: &Config) -> Result<()> {
	let api_base = cfg.service.api_base.trim();

	if api_base.is_empty() {
		return Err(Error::Validation {
			message: "service.api_base must be non-empty.".to_string(),
		});
	}
	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "service.api_base must start with http:// or https://.".to_string(),
		});
	}
	if cfg.service.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "service.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.links.wiki_base.trim().is_empty() {
		return Err(Error::Validation { message: "links.wiki_base must be non-empty.".to_string() });
	}

	for (index, theme) in cfg.suggestions.themes.iter().enumerate() {
		if theme.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("suggestions.themes[{index}] must be non-empty."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.api_base = cfg.service.api_base.trim().trim_end_matches('/').to_string();
	cfg.links.wiki_base = cfg.links.wiki_base.trim().trim_end_matches('/').to_string();
	cfg.suggestions.themes = cfg
		.suggestions
		.themes
		.iter()
		.map(|theme| theme.trim())
		.filter(|theme| !theme.is_empty())
		.map(str::to_string)
		.collect();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_strips_trailing_slashes_and_blank_suggestions() {
		let mut cfg = Config::default();

		cfg.service.api_base = " http://localhost:8000/ ".to_string();
		cfg.links.wiki_base = "https://blueypedia.fandom.com//".to_string();
		cfg.suggestions.themes = vec!["  sibling conflict ".to_string(), "   ".to_string()];

		normalize(&mut cfg);

		assert_eq!(cfg.service.api_base, "http://localhost:8000");
		assert_eq!(cfg.links.wiki_base, "https://blueypedia.fandom.com");
		assert_eq!(cfg.suggestions.themes, vec!["sibling conflict".to_string()]);
	}

	#[test]
	fn defaults_are_valid() {
		validate(&defaults()).expect("Defaults must validate.");
	}
}
