//! Error envelope

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ "error": ..., "details"?: ... }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
