use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Why a single generation call produced no result.
/// Every variant is terminal for that call; nothing is retried or partially applied.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Model call failed: {0}")]
    Transport(#[from] LlmError),

    #[error("Response does not match the declared shape: {0}")]
    SchemaViolation(String),

    #[error("Model returned no content")]
    EmptyResponse,

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Generation(GenerationError::Precondition(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Generation(GenerationError::Encode(e)) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    "The AI service could not complete this request. Please try again.".to_string(),
                )
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_maps_to_bad_request() {
        let response =
            AppError::from(GenerationError::Precondition("role is empty".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_schema_violation_and_empty_map_to_bad_gateway() {
        let schema = AppError::from(GenerationError::SchemaViolation("bad".to_string()));
        assert_eq!(schema.into_response().status(), StatusCode::BAD_GATEWAY);
        let empty = AppError::from(GenerationError::EmptyResponse);
        assert_eq!(empty.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_encode_failure_is_an_internal_error() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let response = AppError::from(GenerationError::from(cause)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("session".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
