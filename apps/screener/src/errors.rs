use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Failure of a single resume's screening pass. Each stage of the pipeline
/// has its own variant so callers can tell a stuck upload from a bad reply.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Could not stage file for upload: {0}")]
    Staging(#[from] std::io::Error),

    #[error("Upload failed: {0}")]
    Upload(#[source] LlmError),

    #[error("File processing failed for asset {asset}")]
    ProcessingFailed { asset: String },

    #[error("File still processing after {attempts} status checks")]
    Timeout { attempts: u32 },

    #[error("Inference request failed: {0}")]
    Transport(#[source] LlmError),

    #[error("Model reply is not valid JSON: {0}")]
    MalformedResponse(String),

    #[error("Model reply does not match the expected schema at '{field}': {detail}")]
    SchemaMismatch { field: String, detail: String },
}

impl ScreenError {
    pub fn schema(field: impl Into<String>, detail: impl Into<String>) -> Self {
        ScreenError::SchemaMismatch {
            field: field.into(),
            detail: detail.into(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Screen(#[from] ScreenError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Screen(err) => screen_error_parts(err),
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

fn screen_error_parts(err: &ScreenError) -> (StatusCode, &'static str, String) {
    match err {
        ScreenError::Staging(e) => {
            tracing::error!("Staging error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
            )
        }
        ScreenError::Upload(_) | ScreenError::ProcessingFailed { .. } => {
            tracing::error!("{err}");
            (StatusCode::BAD_GATEWAY, "UPLOAD_FAILED", err.to_string())
        }
        ScreenError::Timeout { .. } => {
            tracing::error!("{err}");
            (StatusCode::GATEWAY_TIMEOUT, "PROCESSING_TIMEOUT", err.to_string())
        }
        ScreenError::Transport(e) => {
            tracing::error!("LLM error: {e}");
            (
                StatusCode::BAD_GATEWAY,
                "LLM_ERROR",
                "An AI processing error occurred".to_string(),
            )
        }
        ScreenError::MalformedResponse(_) => {
            tracing::error!("{err}");
            (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", err.to_string())
        }
        ScreenError::SchemaMismatch { .. } => {
            tracing::error!("{err}");
            (StatusCode::BAD_GATEWAY, "SCHEMA_MISMATCH", err.to_string())
        }
    }
}
