//! Router-level tests for the analysis endpoint.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tg_core::{ServerConfig, TgError, TgResult};
use tg_gemini::CompletionProvider;
use tg_web::{create_router, state::AppState};
use tower::ServiceExt;

struct FakeProvider {
    reply: TgResult<String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeProvider {
    fn new(reply: TgResult<String>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> TgResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.reply.clone()
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

fn app_with(provider: &Arc<FakeProvider>) -> Router {
    create_router(AppState::new(provider.clone()), None)
}

fn post_analyze(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

const MODEL_OUTPUT: &str = r#"{"verdict":"REAL","confidence":87}"#;

#[tokio::test]
async fn test_analyze_forwards_model_text() {
    let provider = FakeProvider::new(Ok(MODEL_OUTPUT.to_string()));
    let text = "Local council approves new \"bike lane\" budget";

    let (status, body) = send(
        app_with(&provider),
        post_analyze(json!({ "newsText": text }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": MODEL_OUTPUT }));
    assert_eq!(provider.calls(), 1);

    let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains(text));
}

#[tokio::test]
async fn test_analyze_accepts_string_encoded_body() {
    let provider = FakeProvider::new(Ok(MODEL_OUTPUT.to_string()));
    let body = serde_json::to_string(&json!({ "newsText": "Stocks rally after rate cut" }).to_string())
        .unwrap();

    let (status, _) = send(app_with(&provider), post_analyze(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_missing_news_text_is_bad_request() {
    let provider = FakeProvider::new(Ok(MODEL_OUTPUT.to_string()));

    let (status, body) = send(app_with(&provider), post_analyze(json!({}).to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing newsText");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_empty_news_text_is_bad_request() {
    let provider = FakeProvider::new(Ok(MODEL_OUTPUT.to_string()));

    let (status, body) = send(
        app_with(&provider),
        post_analyze(json!({ "newsText": "" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let provider = FakeProvider::new(Ok(MODEL_OUTPUT.to_string()));

    let (status, body) = send(app_with(&provider), post_analyze("{newsText:")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON body");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_missing_credential_is_server_error() {
    let app = create_router(AppState::from_config(&ServerConfig::default()), None);

    let (status, body) = send(
        app,
        post_analyze(json!({ "newsText": "A claim worth checking" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Missing GEMINI_API_KEY");
}

#[tokio::test]
async fn test_validation_precedes_credential_check() {
    let state = AppState::unconfigured(TgError::configuration("Missing GEMINI_API_KEY"));
    let app = create_router(state, None);

    let (status, body) = send(app, post_analyze(json!({ "other": 1 }).to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing newsText");
}

#[tokio::test]
async fn test_wrong_method_is_not_allowed() {
    let provider = FakeProvider::new(Ok(MODEL_OUTPUT.to_string()));

    for method in ["GET", "PUT", "DELETE"] {
        let request = Request::builder()
            .method(method)
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "newsText": "A claim worth checking" }).to_string()))
            .unwrap();

        let (status, body) = send(app_with(&provider), request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        assert_eq!(body["error"], "Method not allowed");
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_empty_model_response_is_server_error() {
    let provider = FakeProvider::new(Ok("  ".to_string()));

    let (status, body) = send(
        app_with(&provider),
        post_analyze(json!({ "newsText": "A claim worth checking" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Empty model response");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_upstream_failure_carries_message() {
    let provider = FakeProvider::new(Err(TgError::upstream("Resource has been exhausted")));

    let (status, body) = send(
        app_with(&provider),
        post_analyze(json!({ "newsText": "A claim worth checking" }).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Resource has been exhausted");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_health_reports_operational() {
    let provider = FakeProvider::new(Ok(MODEL_OUTPUT.to_string()));
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app_with(&provider), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_health_without_credential() {
    let app = create_router(AppState::from_config(&ServerConfig::default()), None);
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_static_files_with_spa_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>truthguard</html>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

    let provider = FakeProvider::new(Ok(MODEL_OUTPUT.to_string()));
    let app = create_router(AppState::new(provider.clone()), Some(dir.path()));

    for (uri, expected) in [("/app.js", "console.log(1)"), ("/results/42", "<html>truthguard</html>")] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], expected.as_bytes());
    }
}
