//! Decoding of model output into [`AnalysisResult`].
//!
//! The endpoint returns the model's raw text in `{"result": "<text>"}`.
//! Decoding happens once, here, and either yields a validated result or the
//! "Invalid AI response format" parse error.

pub mod model;

use serde_json::Value;
use tracing::debug;

use crate::error::{TgError, TgResult};
use model::AnalysisResult;

/// Decode the raw model text into a validated result.
pub fn decode_result(raw: &str) -> TgResult<AnalysisResult> {
    let result: AnalysisResult = serde_json::from_str(raw).map_err(|e| {
        debug!(error = %e, "Model output is not a valid analysis document");
        TgError::invalid_response()
    })?;

    result.validate().map_err(|reason| {
        debug!(%reason, "Model output failed validation");
        TgError::invalid_response()
    })?;

    Ok(result)
}

/// Decode a success body from the analysis endpoint.
///
/// Only a string `result` is accepted. A structured object in its place is a
/// parse failure rather than a second accepted shape.
pub fn decode_envelope(body: &Value) -> TgResult<AnalysisResult> {
    match body.get("result") {
        Some(Value::String(raw)) => decode_result(raw),
        Some(other) => {
            debug!(kind = json_kind(other), "Unexpected result field type");
            Err(TgError::invalid_response())
        }
        None => {
            debug!("Success body has no result field");
            Err(TgError::invalid_response())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
