pub mod intent;
pub mod render;
pub mod shell;

mod error;

pub use error::{Error, Result};

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use color_eyre::eyre;
use tokio::io::{self, BufReader};
use tracing_subscriber::EnvFilter;

use motif_api::HttpThemeApi;
use motif_config::Config;
use motif_session::{Controller, Session};

use crate::shell::Shell;

#[derive(Debug, Parser)]
#[command(
	version = motif_cli::VERSION,
	about = motif_cli::ABOUT,
	rename_all = "kebab",
	styles = motif_cli::styles(),
)]
pub struct Args {
	/// TOML configuration file. Built-in defaults are used when omitted.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
	/// Overrides `service.api_base`.
	#[arg(long, value_name = "URL")]
	pub api_base: Option<String>,
	/// Runs one search, prints the results, and exits.
	#[arg(long, short = 'q', value_name = "THEME")]
	pub query: Option<String>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = resolve_config(&args)?;

	init_tracing(&config)?;

	let api = HttpThemeApi::new(&config.service)?;

	tracing::info!(api_base = api.api_base(), "Theme service configured.");

	spawn_health_probe(api.clone());

	let session = Session::new(config.links.wiki_base.clone());
	let controller = Controller::new(session, Arc::new(api));
	let mut shell = Shell::new(controller, config.suggestions.themes.clone());
	let mut stdout = io::stdout();

	if let Some(query) = args.query.as_deref() {
		if !shell.run_once(query, &mut stdout).await? {
			return Err(eyre::eyre!("Search for {query:?} did not return results."));
		}

		return Ok(());
	}

	shell.run(BufReader::new(io::stdin()), &mut stdout).await?;

	Ok(())
}

pub fn resolve_config(args: &Args) -> color_eyre::Result<Config> {
	let mut config = match &args.config {
		Some(path) => motif_config::load(path)?,
		None => motif_config::defaults(),
	};

	if let Some(api_base) = &args.api_base {
		config.service.api_base = api_base.trim().trim_end_matches('/').to_string();

		motif_config::validate(&config)?;
	}

	Ok(config)
}

fn init_tracing(config: &Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}

fn spawn_health_probe(api: HttpThemeApi) {
	tokio::spawn(async move {
		match api.health().await {
			Ok(()) => tracing::debug!(api_base = api.api_base(), "Theme service is reachable."),
			Err(err) => tracing::warn!(
				api_base = api.api_base(),
				error = %err,
				"Theme service health check failed."
			),
		}
	});
}
