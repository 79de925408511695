pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Unknown command :{command}. Type :h for help.")]
	UnknownCommand { command: String },
	#[error(":{command} needs a row number.")]
	MissingRow { command: String },
	#[error("{value:?} is not a row number.")]
	InvalidRow { value: String },
}
