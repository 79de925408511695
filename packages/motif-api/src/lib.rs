//! Typed boundary to the theme-search backend.

pub mod http;

mod error;
mod wire;

pub use error::{Error, Result};
pub use http::HttpThemeApi;
pub use wire::{AnswerRequest, FindSimilarRequest, SimilarTheme, SimilarThemesResponse, ThemeRecord};

use std::{future::Future, pin::Pin};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The two stateless backend operations the session depends on.
pub trait ThemeApi
where
	Self: Send + Sync,
{
	fn find_similar_themes<'a>(
		&'a self,
		theme: &'a str,
	) -> BoxFuture<'a, Result<SimilarThemesResponse>>;

	fn fetch_answer<'a>(
		&'a self,
		theme: &'a str,
		similar_theme_id: &'a str,
	) -> BoxFuture<'a, Result<String>>;
}

impl ThemeApi for HttpThemeApi {
	fn find_similar_themes<'a>(
		&'a self,
		theme: &'a str,
	) -> BoxFuture<'a, Result<SimilarThemesResponse>> {
		Box::pin(HttpThemeApi::find_similar_themes(self, theme))
	}

	fn fetch_answer<'a>(
		&'a self,
		theme: &'a str,
		similar_theme_id: &'a str,
	) -> BoxFuture<'a, Result<String>> {
		Box::pin(HttpThemeApi::fetch_answer(self, theme, similar_theme_id))
	}
}
