//! HTTP error handling and response conversion.
//!
//! Every relay failure, whatever its kind, is answered with status 500 and the
//! envelope `{"success": false, "message": ..., "error": ...}`. The `message`
//! names the failed operation; `error` carries the underlying detail, including
//! the upstream status and body when GC2 rejected the call.

use crate::domain::upload::errors::RelayError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// The upload workflow failed (500).
    Upload(RelayError),

    /// A process passthrough failed (500).
    Relay(RelayError),

    /// The route exists but not for this type code (405).
    MethodNotAllowed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload(err) => write!(f, "Upload failed: {}", err),
            Self::Relay(err) => write!(f, "Relay failed: {}", err),
            Self::MethodNotAllowed(msg) => write!(f, "Method not allowed: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Upload(_) | Self::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn user_message(&self) -> &'static str {
        match self {
            Self::Upload(_) => "Failed to process upload",
            Self::Relay(_) => "Failed to relay request",
            Self::MethodNotAllowed(_) => "Method not allowed",
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Upload(err) | Self::Relay(err) => err.to_string(),
            Self::MethodNotAllowed(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Upload(RelayError::InvalidPayload(_)) | Self::MethodNotAllowed(_) => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::error!("error={}", self);
            }
        }

        (
            status,
            Json(json!({
                "success": false,
                "message": self.user_message(),
                "error": self.detail(),
            })),
        )
            .into_response()
    }
}
