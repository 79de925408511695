use std::{io, path::PathBuf};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read motif config {}: {source}", path.display())]
	ReadConfig { path: PathBuf, source: io::Error },
	#[error("Motif config {} is not valid TOML: {source}", path.display())]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error("{message}")]
	Validation { message: String },
}
