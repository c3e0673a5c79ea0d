use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"detail": <message>}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("{0}")]
    UnparseableOutput(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Name of the failure kind, reported to telemetry alongside the message.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::InvalidBody(_) => "InvalidBody",
            AppError::Llm(e) => e.kind(),
            AppError::UnparseableOutput(_) => "UnparseableOutput",
            AppError::Internal(_) => "InternalError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::Llm(_) | AppError::UnparseableOutput(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Validation(msg) => tracing::debug!("Rejected request: {msg}"),
            AppError::InvalidBody(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text())
            }
            AppError::Llm(e) => tracing::error!("LLM error: {e}"),
            AppError::UnparseableOutput(msg) => tracing::error!("Unparseable model output: {msg}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let body = Json(json!({ "detail": self.to_string() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_message_is_passed_through() {
        let err = AppError::from(LlmError::Api {
            status: 401,
            message: "Incorrect API key".to_string(),
        });
        assert_eq!(err.to_string(), "API error (status 401): Incorrect API key");
        assert_eq!(err.error_type(), "ApiError");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = AppError::Validation("Description is required".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "ValidationError");
    }
}
