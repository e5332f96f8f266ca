//! Mapping of [`TgError`] onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tg_core::{api::ErrorBody, TgError};

/// An error answered as `{"error": message}` with the matching status.
#[derive(Debug)]
pub struct ApiError(pub TgError);

impl From<TgError> for ApiError {
    fn from(err: TgError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
