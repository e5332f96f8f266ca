//! Analysis endpoint client.
//!
//! Makes one best-effort attempt per call: no retries, no timeout, no
//! cancellation. Every failure comes back as a single [`TgError`].

use async_trait::async_trait;
use serde_json::Value;
use tg_core::{
    analysis::decode_envelope,
    api::{AnalyzeRequest, ErrorBody, HealthResponse, ANALYZE_PATH, HEALTH_PATH},
    AnalysisResult, TgError, TgResult,
};
use tracing::{debug, warn};

/// Default endpoint URL.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8080";

/// Anything that can turn text into an [`AnalysisResult`].
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> TgResult<AnalysisResult>;
}

/// Client for `POST /api/analyze`.
#[derive(Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a client with default settings.
    ///
    /// Uses the `TRUTHGUARD_URL` environment variable if set,
    /// otherwise defaults to `http://127.0.0.1:8080`.
    pub fn new() -> Self {
        let base_url = std::env::var("TRUTHGUARD_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::with_url(&base_url)
    }

    /// Create a client with a custom base URL.
    pub fn with_url(base_url: &str) -> Self {
        debug!(base_url = %base_url, "AnalysisClient initialized");
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit `text` for analysis.
    ///
    /// The text is forwarded as-is; callers enforce any minimum length.
    pub async fn analyze(&self, text: &str) -> TgResult<AnalysisResult> {
        let url = format!("{}{}", self.base_url, ANALYZE_PATH);
        let request = AnalyzeRequest {
            news_text: text.to_string(),
        };

        debug!(url = %url, chars = text.chars().count(), "Sending analysis request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, url = %url, "Analysis request failed");
                TgError::transport(e.to_string())
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TgError::transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .map(|b| b.error);
            warn!(status_code = %status, message = ?message, "Analysis endpoint returned an error");
            return Err(TgError::from_status(status.as_u16(), message));
        }

        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| TgError::transport(e.to_string()))?;

        decode_envelope(&body)
    }

    /// Query `GET /api/health`.
    pub async fn health(&self) -> TgResult<HealthResponse> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TgError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TgError::from_status(response.status().as_u16(), None));
        }

        response
            .json()
            .await
            .map_err(|e| TgError::transport(e.to_string()))
    }
}

impl Default for AnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Analyzer for AnalysisClient {
    async fn analyze(&self, text: &str) -> TgResult<AnalysisResult> {
        AnalysisClient::analyze(self, text).await
    }
}
