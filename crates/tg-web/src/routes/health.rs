//! Liveness endpoint.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use tg_core::api::{HealthResponse, STATUS_OPERATIONAL};

/// GET /api/health - Report that the server is up.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS_OPERATIONAL.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
