//! API integration tests.
//!
//! Remote collaborators (the video source and the Gemini API) are served by
//! wiremock; the router is driven with `oneshot`.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path as url_path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vnotes_api::{create_router, ApiConfig, AppState, NotesService};
use vnotes_gemini::{GeminiClient, GeminiConfig};

const LONG_NOTES: &str =
    "# Notatki\n\n## 1. Sekcja\n- **Data/Miejsce:** 11 listopada 1918 r., Warszawa\n- Cel/Zadanie/Rola: przegląd materiału";

fn test_state(gemini_base: String, staging_dir: &Path, direct: bool) -> AppState {
    let gemini_config = GeminiConfig {
        api_key: "test-key".to_string(),
        base_url: gemini_base,
        direct_video_urls: direct,
        poll_interval: Duration::from_millis(10),
        poll_timeout: Duration::from_secs(5),
        ..GeminiConfig::default()
    };
    let gemini = Arc::new(GeminiClient::new(gemini_config).unwrap());

    let config = ApiConfig {
        staging_dir: staging_dir.to_path_buf(),
        ..ApiConfig::default()
    };
    let notes = NotesService::new(
        gemini,
        reqwest::Client::new(),
        config.staging_dir.clone(),
        config.prompt.clone(),
    );

    AppState { config, notes }
}

fn test_router(gemini_base: String, staging_dir: &Path) -> Router {
    create_router(test_state(gemini_base, staging_dir, false), None)
}

async fn post_generate(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn staged_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

/// Mount the happy-path Gemini mocks: resumable upload, one poll to ACTIVE,
/// generation, and the cleanup delete.
async fn mount_gemini_upload_flow(server: &MockServer, notes: &str) {
    Mock::given(method("POST"))
        .and(url_path("/v1beta/files:upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Goog-Upload-URL", format!("{}/session", server.uri()).as_str()),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(url_path("/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file": {
                "name": "files/abc123",
                "uri": format!("{}/v1beta/files/abc123", server.uri()),
                "state": "PROCESSING",
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(url_path("/v1beta/files/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "files/abc123",
            "uri": format!("{}/v1beta/files/abc123", server.uri()),
            "state": "ACTIVE",
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(url_path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": notes}]}}]
        })))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(url_path("/v1beta/files/abc123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .named("remote file cleanup")
        .mount(server)
        .await;
}

/// Missing `videoURL` returns the exact Polish message with HTTP 400.
#[tokio::test]
async fn test_missing_video_url() {
    let staging = TempDir::new().unwrap();
    let app = test_router("http://127.0.0.1:1".to_string(), staging.path());

    let (status, body) = post_generate(app, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Brak 'videoURL' w zapytaniu.");
    assert_eq!(staged_count(staging.path()), 0);
}

/// An empty string behaves like a missing field.
#[tokio::test]
async fn test_empty_video_url() {
    let staging = TempDir::new().unwrap();
    let app = test_router("http://127.0.0.1:1".to_string(), staging.path());

    let (status, body) = post_generate(app, json!({"videoURL": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Brak 'videoURL' w zapytaniu.");
}

/// A malformed URL is rejected before any network call.
#[tokio::test]
async fn test_malformed_video_url() {
    let staging = TempDir::new().unwrap();
    // Nothing is listening here; a network attempt would fail differently.
    let app = test_router("http://127.0.0.1:1".to_string(), staging.path());

    let (status, body) = post_generate(app, json!({"videoURL": "not-a-url"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Nieprawidłowy lub brakujący adres URL wideo.");
    assert_eq!(staged_count(staging.path()), 0);
}

/// An unreachable video maps to the video-unavailable message.
#[tokio::test]
async fn test_fetch_404_maps_to_video_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(url_path("/video.mp4"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let staging = TempDir::new().unwrap();
    let app = test_router(server.uri(), staging.path());

    let (status, body) =
        post_generate(app, json!({"videoURL": format!("{}/video.mp4", server.uri())})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Błąd wideo: Wprowadzony adres URL jest nieprawidłowy, wideo nie jest dostępne lub nie można go przetworzyć."
    );
    assert_eq!(staged_count(staging.path()), 0);
}

/// Full upload-relay path: fetch, upload, poll to ACTIVE, generate, clean up.
#[tokio::test]
async fn test_upload_relay_happy_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(url_path("/video.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x42_u8; 128 * 1024]))
        .mount(&server)
        .await;
    mount_gemini_upload_flow(&server, LONG_NOTES).await;

    let staging = TempDir::new().unwrap();
    let app = test_router(server.uri(), staging.path());

    let (status, body) =
        post_generate(app, json!({"videoURL": format!("{}/video.mp4", server.uri())})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"], LONG_NOTES);

    // The staged copy is gone and the remote delete was requested (verified
    // by the mock expectation when the server drops).
    assert_eq!(staged_count(staging.path()), 0);
}

/// A short generation result is an error, and cleanup still runs on the
/// failure path.
#[tokio::test]
async fn test_short_generation_fails_and_cleans_up() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(url_path("/video.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x42_u8; 1024]))
        .mount(&server)
        .await;
    mount_gemini_upload_flow(&server, "za krótko").await;

    let staging = TempDir::new().unwrap();
    let app = test_router(server.uri(), staging.path());

    let (status, body) =
        post_generate(app, json!({"videoURL": format!("{}/video.mp4", server.uri())})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Model nie był w stanie wygenerować treści. Upewnij się, że film jest dostępny i ma transkrypcję."
    );
    assert_eq!(staged_count(staging.path()), 0);
}

/// A remote FAILED state terminates the poll and maps to the video message.
#[tokio::test]
async fn test_remote_processing_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(url_path("/video.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x42_u8; 1024]))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(url_path("/v1beta/files:upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Goog-Upload-URL", format!("{}/session", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(url_path("/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file": {
                "name": "files/abc123",
                "uri": format!("{}/v1beta/files/abc123", server.uri()),
                "state": "PROCESSING",
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(url_path("/v1beta/files/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "files/abc123",
            "state": "FAILED",
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(url_path("/v1beta/files/abc123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let staging = TempDir::new().unwrap();
    let app = test_router(server.uri(), staging.path());

    let (status, body) =
        post_generate(app, json!({"videoURL": format!("{}/video.mp4", server.uri())})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Błąd wideo: Wprowadzony adres URL jest nieprawidłowy, wideo nie jest dostępne lub nie można go przetworzyć."
    );
    assert_eq!(staged_count(staging.path()), 0);
}

/// With the direct-URL capability on, no staging or upload happens at all.
#[tokio::test]
async fn test_direct_reference_mode_skips_staging() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(url_path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": LONG_NOTES}]}}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(url_path("/v1beta/files:upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .named("no upload in direct mode")
        .mount(&server)
        .await;

    let staging = TempDir::new().unwrap();
    let app = create_router(test_state(server.uri(), staging.path(), true), None);

    let (status, body) = post_generate(
        app,
        json!({"videoURL": "https://example.com/lecture.mp4"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"], LONG_NOTES);
    assert_eq!(staged_count(staging.path()), 0);
}

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let staging = TempDir::new().unwrap();
    let app = test_router("http://127.0.0.1:1".to_string(), staging.path());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// Test security and request-id headers.
#[tokio::test]
async fn test_response_headers() {
    let staging = TempDir::new().unwrap();
    let app = test_router("http://127.0.0.1:1".to_string(), staging.path());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert!(headers.contains_key("X-Content-Type-Options"));
    assert!(headers.contains_key("X-Frame-Options"));
    assert!(headers.contains_key("X-Request-ID"));
}
