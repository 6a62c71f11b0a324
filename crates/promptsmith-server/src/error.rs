//! HTTP error mapping
//!
//! Every failure leaves the server as a complete `{ error, details? }`
//! envelope. `details` is only filled in development.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use promptsmith::DomainError;

use crate::models::ErrorResponse;

/// Error returned by route handlers
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    /// Body that failed to deserialize. Serde's message is caller-actionable,
    /// so it is always included.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid JSON body").with_details(rejection.body_text())
    }

    /// Map a domain error, exposing internals only when `expose_details` is set
    pub fn from_domain(err: DomainError, expose_details: bool) -> Self {
        let (status, message) = match &err {
            DomainError::Validation(msg) => {
                return Self::bad_request(msg.clone());
            }
            DomainError::NotFound { entity_type, .. } => {
                return Self::new(StatusCode::NOT_FOUND, format!("{entity_type} not found"));
            }
            DomainError::Configuration(_) => {
                tracing::error!(error = %err, "❌ Server configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error")
            }
            DomainError::Upstream { status, .. } => {
                tracing::error!(upstream_status = ?status, error = %err, "❌ Upstream completion failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to optimize prompt")
            }
            DomainError::Repository(_) => {
                tracing::error!(error = %err, "❌ Repository error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let api_error = Self::new(status, message);
        if expose_details {
            api_error.with_details(err.to_string())
        } else {
            api_error
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}
