//! Gemini HTTP client.
//!
//! Uses the `generateContent` endpoint and asks for an
//! `application/json` response so the text part is a bare JSON document.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tg_core::{ServerConfig, TgError, TgResult};
use tracing::debug;

use crate::provider::CompletionProvider;

/// Gemini text-completion client.
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

impl GenerateResponse {
    /// The first text fragment, or an empty string.
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default()
    }
}

impl GeminiClient {
    /// Create a new client for the given API base, model and key.
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client: builder.build().unwrap_or_default(),
        }
    }

    /// Create a client from server configuration.
    ///
    /// Fails with a configuration error when no credential is set.
    pub fn from_config(config: &ServerConfig) -> TgResult<Self> {
        let api_key = config.credential()?;
        Ok(Self::new(
            &config.api_base,
            &config.model,
            api_key,
            config.request_timeout_secs.map(Duration::from_secs),
        ))
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, prompt: &str) -> TgResult<String> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TgError::upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Gemini API error ({}): {}", status, body));
            return Err(TgError::upstream(message));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TgError::upstream(format!("Failed to parse Gemini response: {}", e)))?;

        let text = result.into_text();
        debug!(model = %self.model, len = text.len(), "Received model response");

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use tg_core::ErrorKind;

    const PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    fn client_for(server: &mockito::Server) -> GeminiClient {
        GeminiClient::new(&server.url(), "gemini-1.5-flash", "test-key", None)
    }

    #[tokio::test]
    async fn test_complete_extracts_first_part() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"parts": [{"text": "hello"}]}],
                "generationConfig": {"responseMimeType": "application/json"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [
                        {"content": {"parts": [{"text": "{\"verdict\":\"REAL\"}"}, {"text": "ignored"}]}},
                        {"content": {"parts": [{"text": "second candidate"}]}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let text = client_for(&server).complete("hello").await.unwrap();
        assert_eq!(text, "{\"verdict\":\"REAL\"}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_without_candidates_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string())
            .create_async()
            .await;

        let text = client_for(&server).complete("hello").await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}})
                    .to_string(),
            )
            .create_async()
            .await;

        let err = client_for(&server).complete("hello").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.to_string(), "API key not valid");
    }

    #[tokio::test]
    async fn test_error_without_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let err = client_for(&server).complete("hello").await.unwrap_err();
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("overloaded"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_upstream() {
        let client = GeminiClient::new("http://127.0.0.1:1", "gemini-1.5-flash", "k", None);
        let err = client.complete("hello").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_from_config_requires_credential() {
        let err = GeminiClient::from_config(&ServerConfig::default()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let config = ServerConfig {
            api_key: Some("k".to_string()),
            api_base: "http://localhost:9/".to_string(),
            ..ServerConfig::default()
        };
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-1.5-flash");
    }
}
