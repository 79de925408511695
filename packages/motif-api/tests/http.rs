use motif_api::{Error, FindSimilarRequest, HttpThemeApi};
use motif_testkit::{FakeBackend, RecordedRequest, Reply, TAKE_TURNS_ANSWER};

fn client_for(backend: &FakeBackend) -> HttpThemeApi {
	let service = motif_config::Service {
		api_base: format!("{}/", backend.api_base()),
		timeout_ms: 5_000,
		log_level: "info".to_string(),
	};

	HttpThemeApi::new(&service).expect("Failed to build API client.")
}

#[tokio::test]
async fn find_similar_posts_theme_and_decodes_payload() {
	let backend = FakeBackend::start().await.expect("Failed to start fake backend.");
	let api = client_for(&backend);

	backend.set_find_similar(Reply::themes(&motif_testkit::sibling_conflict()));

	let response = api.find_similar_themes("sibling conflict").await.expect("request failed");

	assert_eq!(response, motif_testkit::sibling_conflict());
	assert_eq!(
		backend.requests(),
		vec![RecordedRequest::FindSimilar(FindSimilarRequest {
			theme: "sibling conflict".to_string()
		})]
	);
}

#[tokio::test]
async fn fetch_answer_returns_plain_string() {
	let backend = FakeBackend::start().await.expect("Failed to start fake backend.");
	let api = client_for(&backend);

	backend.set_answer("m2", Reply::answer(TAKE_TURNS_ANSWER));

	let answer = api.fetch_answer("sibling conflict", "m2").await.expect("request failed");

	assert_eq!(answer, TAKE_TURNS_ANSWER);
}

#[tokio::test]
async fn backend_error_carries_status_and_detail() {
	let backend = FakeBackend::start().await.expect("Failed to start fake backend.");
	let api = client_for(&backend);
	let err = api.fetch_answer("sibling conflict", "m9").await.expect_err("Expected 404.");

	match err {
		Error::Backend { status, message } => {
			assert_eq!(status, 404);
			assert_eq!(message, "Theme m9 not found");
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
	let backend = FakeBackend::start().await.expect("Failed to start fake backend.");
	let api = client_for(&backend);

	backend.set_find_similar(Reply::Json(serde_json::json!({ "themes": [{ "score": 1.0 }] })));

	let err = api.find_similar_themes("x").await.expect_err("Expected decode error.");

	assert!(matches!(err, Error::Decode { .. }), "Unexpected error: {err:?}.");
}

#[tokio::test]
async fn health_probe_hits_root() {
	let backend = FakeBackend::start().await.expect("Failed to start fake backend.");
	let api = client_for(&backend);

	api.health().await.expect("health failed");

	assert_eq!(backend.requests(), vec![RecordedRequest::Health]);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
	let service = motif_config::Service {
		api_base: "http://127.0.0.1:1".to_string(),
		timeout_ms: 1_000,
		log_level: "info".to_string(),
	};
	let api = HttpThemeApi::new(&service).expect("Failed to build API client.");
	let err = api.find_similar_themes("x").await.expect_err("Expected network error.");

	assert!(matches!(err, Error::Network(_)), "Unexpected error: {err:?}.");
}
