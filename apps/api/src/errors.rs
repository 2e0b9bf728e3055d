#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A required credential or setting is absent. The message is safe to
    /// show to an operator (it names the missing setting, never a value).
    #[error("{0}")]
    Configuration(String),

    /// An external API (OpenAI, humanizer) answered with a failure.
    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                msg.clone(),
            ),
            AppError::Upstream { status, message } => {
                tracing::error!(status = ?status, "Upstream API error: {message}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message.clone())
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => AppError::Configuration(
                "OpenAI API key not configured. Please add it in Settings.".to_string(),
            ),
            LlmError::Http(e) => AppError::Upstream {
                status: None,
                message: format!("OpenAI request failed: {e}"),
            },
            LlmError::Api { status, message } => AppError::Upstream {
                status: Some(status),
                message: format!("OpenAI API error (status {status}): {message}"),
            },
            LlmError::Parse(e) => AppError::Upstream {
                status: None,
                message: format!("OpenAI response could not be parsed: {e}"),
            },
            LlmError::EmptyResponse => AppError::Upstream {
                status: None,
                message: "OpenAI returned an empty response".to_string(),
            },
        }
    }
}
