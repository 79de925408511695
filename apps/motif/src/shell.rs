//! Line-oriented interactive shell over a [`Controller`].

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use motif_session::{Controller, Error as SessionError};

use crate::{
	intent::{self, Intent},
	render::{HELP, SessionView, Suggestions},
};

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
	Render,
	Notice(String),
	Ignore,
	Quit,
}

pub struct Shell {
	controller: Controller,
	suggestions: Vec<String>,
}
impl Shell {
	pub fn new(controller: Controller, suggestions: Vec<String>) -> Self {
		Self { controller, suggestions }
	}

	pub fn controller(&self) -> &Controller {
		&self.controller
	}

	pub fn view(&self) -> String {
		SessionView { session: self.controller.session(), suggestions: &self.suggestions }
			.to_string()
	}

	pub fn handle(&mut self, intent: Intent) -> Outcome {
		match intent {
			Intent::Submit(text) => {
				self.controller.set_query(&text);

				match self.controller.submit(&text) {
					Ok(_) => Outcome::Render,
					Err(SessionError::EmptyQuery) => Outcome::Ignore,
					Err(err) => Outcome::Notice(err.to_string()),
				}
			},
			Intent::Suggest(number) => match number.checked_sub(1).and_then(|i| self.suggestions.get(i))
			{
				Some(theme) => {
					let theme = theme.clone();

					self.handle(Intent::Submit(theme))
				},
				None => Outcome::Notice(format!("There is no suggestion {number}.")),
			},
			Intent::Toggle(row) => {
				let Some(match_id) = self.match_id(row) else {
					return Outcome::Notice(format!("There is no result {row}."));
				};

				into_outcome(self.controller.toggle_expand(&match_id))
			},
			Intent::Retry(row) => {
				let Some(match_id) = self.match_id(row) else {
					return Outcome::Notice(format!("There is no result {row}."));
				};

				into_outcome(self.controller.retry_answer(&match_id))
			},
			Intent::ListSuggestions => Outcome::Notice(Suggestions(&self.suggestions).to_string()),
			Intent::Help => Outcome::Notice(HELP.to_string()),
			Intent::Quit => Outcome::Quit,
		}
	}

	/// Reads commands from `input` until `:q` or end of input, redrawing on every change.
	///
	/// At end of input, requests still in flight are awaited so their results are shown.
	pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
	where
		R: AsyncBufRead + Unpin,
		W: AsyncWrite + Unpin,
	{
		let mut lines = input.lines();

		write_block(out, &self.view()).await?;

		loop {
			tokio::select! {
				Some(completion) = self.controller.next_completion(), if self.controller.in_flight() > 0 => {
					if self.controller.apply(completion) {
						write_block(out, &self.view()).await?;
					}
				},
				line = lines.next_line() => {
					let Some(line) = line? else {
						break;
					};

					match self.dispatch_line(&line) {
						Outcome::Render => write_block(out, &self.view()).await?,
						Outcome::Notice(text) => write_block(out, &text).await?,
						Outcome::Ignore => {},
						Outcome::Quit => return Ok(()),
					}
				},
			}
		}

		while let Some(completion) = self.controller.next_completion().await {
			if self.controller.apply(completion) {
				write_block(out, &self.view()).await?;
			}
		}

		Ok(())
	}

	/// Runs a single search to completion and prints the result list.
	///
	/// Returns whether the search succeeded.
	pub async fn run_once<W>(&mut self, query: &str, out: &mut W) -> io::Result<bool>
	where
		W: AsyncWrite + Unpin,
	{
		match self.handle(Intent::Submit(query.to_string())) {
			Outcome::Notice(text) => {
				write_block(out, &text).await?;

				return Ok(false);
			},
			Outcome::Ignore => {
				write_block(out, &SessionError::EmptyQuery.to_string()).await?;

				return Ok(false);
			},
			Outcome::Render | Outcome::Quit => {},
		}

		self.controller.settle().await;

		write_block(out, &self.view()).await?;

		Ok(self.controller.session().results().is_some())
	}

	fn dispatch_line(&mut self, line: &str) -> Outcome {
		match intent::parse(line) {
			Ok(intent) => self.handle(intent),
			Err(err) => Outcome::Notice(err.to_string()),
		}
	}

	fn match_id(&self, row: usize) -> Option<String> {
		let results = self.controller.session().results()?;

		results.matches().get(row.checked_sub(1)?).map(|item| item.id().to_string())
	}
}

fn into_outcome(result: motif_session::Result<()>) -> Outcome {
	match result {
		Ok(()) => Outcome::Render,
		Err(err) => Outcome::Notice(err.to_string()),
	}
}

async fn write_block<W>(out: &mut W, text: &str) -> io::Result<()>
where
	W: AsyncWrite + Unpin,
{
	out.write_all(text.as_bytes()).await?;

	if !text.ends_with('\n') {
		out.write_all(b"\n").await?;
	}

	out.write_all(b"\n").await?;
	out.flush().await
}
