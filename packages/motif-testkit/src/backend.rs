use std::{
	collections::HashMap,
	net::SocketAddr,
	sync::{Arc, Mutex, MutexGuard},
};

use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};

use crate::Result;
use motif_api::{AnswerRequest, FindSimilarRequest, SimilarThemesResponse, http};

/// What the fake backend sends back for one route.
#[derive(Clone, Debug)]
pub enum Reply {
	Json(Value),
	Raw { status: u16, body: String },
}
impl Reply {
	pub fn themes(payload: &SimilarThemesResponse) -> Self {
		Self::Json(serde_json::to_value(payload).unwrap_or(Value::Null))
	}

	pub fn answer(text: &str) -> Self {
		Self::Json(Value::String(text.to_string()))
	}

	pub fn error(status: u16, detail: &str) -> Self {
		Self::Raw { status, body: serde_json::json!({ "detail": detail }).to_string() }
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedRequest {
	FindSimilar(FindSimilarRequest),
	Answer(AnswerRequest),
	Health,
}

#[derive(Default)]
struct BackendState {
	find_similar: Mutex<Option<Reply>>,
	answers: Mutex<HashMap<String, Reply>>,
	requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process HTTP server speaking the theme-search wire contract.
pub struct FakeBackend {
	addr: SocketAddr,
	state: Arc<BackendState>,
	handle: JoinHandle<()>,
}
impl FakeBackend {
	pub async fn start() -> Result<Self> {
		let state = Arc::new(BackendState::default());
		let app = Router::new()
			.route(http::HEALTH_PATH, get(health))
			.route(http::FIND_SIMILAR_PATH, post(find_similar))
			.route(http::ANSWER_PATH, post(answer))
			.with_state(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Ok(Self { addr, state, handle })
	}

	pub fn api_base(&self) -> String {
		format!("http://{}", self.addr)
	}

	pub fn set_find_similar(&self, reply: Reply) {
		*lock(&self.state.find_similar) = Some(reply);
	}

	pub fn set_answer(&self, similar_theme_id: &str, reply: Reply) {
		lock(&self.state.answers).insert(similar_theme_id.to_string(), reply);
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		lock(&self.state.requests).clone()
	}
}
impl Drop for FakeBackend {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

async fn health(State(state): State<Arc<BackendState>>) -> Json<&'static str> {
	lock(&state.requests).push(RecordedRequest::Health);

	Json("healthy")
}

async fn find_similar(
	State(state): State<Arc<BackendState>>,
	Json(payload): Json<FindSimilarRequest>,
) -> Response {
	lock(&state.requests).push(RecordedRequest::FindSimilar(payload));

	let reply = lock(&state.find_similar).clone();

	match reply {
		Some(reply) => render(reply),
		None => render(Reply::Json(serde_json::json!({ "themes": [] }))),
	}
}

async fn answer(
	State(state): State<Arc<BackendState>>,
	Json(payload): Json<AnswerRequest>,
) -> Response {
	let reply = lock(&state.answers).get(&payload.similar_theme_id).cloned();
	let missing = format!("Theme {} not found", payload.similar_theme_id);

	lock(&state.requests).push(RecordedRequest::Answer(payload));

	render(reply.unwrap_or_else(|| Reply::error(404, &missing)))
}

fn render(reply: Reply) -> Response {
	match reply {
		Reply::Json(value) => Json(value).into_response(),
		Reply::Raw { status, body } => {
			let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

			(status, body).into_response()
		},
	}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|err| err.into_inner())
}
