use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Handled generation outcomes (validation notices, provider failures) are not
/// errors — they land on the board and the handler returns 200 with a
/// snapshot. The single-flight rejection is the one fault a caller sees;
/// malformed request bodies are rejected by the extractors before a handler
/// runs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("A generation is already in progress.")]
    Busy,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Busy => (
                StatusCode::CONFLICT,
                "GENERATION_IN_PROGRESS",
                "A generation is already in progress.",
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
