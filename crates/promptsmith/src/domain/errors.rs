//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller fault (empty prompt, malformed body)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operator fault (missing or malformed credential)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Dependency fault (non-2xx, transport error, timeout, empty completion)
    #[error("{}", upstream_message(.status, .body))]
    Upstream { status: Option<u16>, body: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Repository error: {0}")]
    Repository(String),
}

fn upstream_message(status: &Option<u16>, body: &str) -> String {
    match status {
        Some(status) => format!("Upstream failure (HTTP {status}): {body}"),
        None => format!("Upstream failure: {body}"),
    }
}

impl DomainError {
    pub fn not_found_str<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn upstream(status: Option<u16>, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }
}
