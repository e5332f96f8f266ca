//! Wire types shared by the analysis endpoint and its client.

use serde::{Deserialize, Serialize};

/// Path of the analysis endpoint.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Path of the liveness endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Status reported by a live server.
pub const STATUS_OPERATIONAL: &str = "operational";

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub news_text: String,
}

/// Success body of `POST /api/analyze`: the model's raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp of the response.
    pub timestamp: String,
}
