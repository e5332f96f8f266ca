//! Analysis route handler.

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tg_core::{api::AnalyzeResponse, prompt::build_prompt, TgError, TgResult};
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/analyze - Forward the text to the model and return its output.
pub async fn analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let news_text = extract_news_text(&body)?;
    let provider = state.provider()?;

    info!(model = provider.model(), chars = news_text.chars().count(), "Analyzing text");

    let prompt = build_prompt(&news_text);
    let text = provider.complete(&prompt).await.map_err(|e| {
        error!(error = %e, "Model provider call failed");
        e
    })?;

    if text.trim().is_empty() {
        error!("Model provider returned no text");
        return Err(TgError::upstream("Empty model response").into());
    }

    debug!(len = text.len(), "Returning model output");
    Ok(Json(AnalyzeResponse { result: text }))
}

/// Any other method on /api/analyze.
pub async fn method_not_allowed() -> ApiError {
    ApiError(TgError::MethodNotAllowed("Method not allowed".to_string()))
}

/// Pull `newsText` out of a body that is either a JSON object or a JSON
/// string holding one.
fn extract_news_text(body: &[u8]) -> TgResult<String> {
    let invalid = |_| TgError::validation("Invalid JSON body");

    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(body).map_err(invalid)?
    };

    let value = match value {
        Value::String(inner) => serde_json::from_str::<Value>(&inner).map_err(invalid)?,
        other => other,
    };

    match value.get("newsText") {
        None | Some(Value::Null) => Err(TgError::validation("Missing newsText")),
        Some(Value::String(text)) if text.is_empty() => {
            Err(TgError::validation("Missing newsText"))
        }
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(TgError::validation("newsText must be a string")),
    }
}
