//! Parses shell input lines into user intents.

use crate::{Error, Result};

/// Row and suggestion numbers are 1-based, as displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
	Submit(String),
	Suggest(usize),
	Toggle(usize),
	Retry(usize),
	ListSuggestions,
	Help,
	Quit,
}

pub fn parse(line: &str) -> Result<Intent> {
	let trimmed = line.trim();

	// A leading '/' searches for the rest literally, so "/42" and "/:x" are queries.
	if let Some(query) = trimmed.strip_prefix('/') {
		return Ok(Intent::Submit(query.to_string()));
	}
	if let Some(command) = trimmed.strip_prefix(':') {
		return parse_command(command);
	}
	if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
		return Ok(Intent::Toggle(parse_row(trimmed)?));
	}

	Ok(Intent::Submit(line.to_string()))
}

fn parse_command(command: &str) -> Result<Intent> {
	let mut parts = command.split_whitespace();
	let name = parts.next().unwrap_or_default();
	let arg = parts.next();

	match name {
		"q" | "quit" => Ok(Intent::Quit),
		"h" | "help" => Ok(Intent::Help),
		"l" | "list" => Ok(Intent::ListSuggestions),
		"s" | "suggest" => Ok(Intent::Suggest(row_arg(name, arg)?)),
		"o" | "open" => Ok(Intent::Toggle(row_arg(name, arg)?)),
		"r" | "retry" => Ok(Intent::Retry(row_arg(name, arg)?)),
		other => Err(Error::UnknownCommand { command: other.to_string() }),
	}
}

fn row_arg(name: &str, arg: Option<&str>) -> Result<usize> {
	let value = arg.ok_or_else(|| Error::MissingRow { command: name.to_string() })?;

	parse_row(value)
}

fn parse_row(value: &str) -> Result<usize> {
	match value.parse::<usize>() {
		Ok(row) if row > 0 => Ok(row),
		_ => Err(Error::InvalidRow { value: value.to_string() }),
	}
}
