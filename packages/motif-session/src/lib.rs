//! Result retrieval and progressive disclosure for theme search.
//!
//! - [`model`]: raw backend payload to an ordered [`ResultSet`].
//! - [`search`]: query text and the idle/pending/succeeded/failed lifecycle.
//! - [`disclosure`]: the single open row and per-row answer cache.
//! - [`session`]: both state machines behind one object, emitting [`Effect`]s.
//! - [`controller`]: executes effects asynchronously and discards stale completions.

pub mod controller;
pub mod disclosure;
pub mod model;
pub mod search;
pub mod session;

mod error;

pub use controller::{Completion, Controller};
pub use disclosure::{AnswerStatus, DisclosureState, Toggle};
pub use error::{Error, Result};
pub use model::{MatchResult, ResultSet, SemanticTheme};
pub use search::{SearchState, SearchStatus, SearchToken};
pub use session::{Effect, Session};
