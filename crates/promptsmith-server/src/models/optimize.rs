//! Optimize request/response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use promptsmith::{Analysis, OptimizationSettings, TargetModel, TokenUsage};

/// Optimize prompt request
///
/// Every field is optional at the wire level so that a missing prompt
/// surfaces as a validation error rather than a body rejection.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequestBody {
    /// The prompt to optimize (required, non-empty)
    pub prompt: Option<String>,
    /// openai | anthropic | google | image; anything else, including a
    /// non-string value, falls back to openai
    #[schema(value_type = Option<String>, example = "anthropic")]
    pub target_model: Option<Value>,
    /// Flags default to true unless explicitly `false`
    pub optimization_settings: Option<OptimizationSettings>,
}

/// Optimize prompt response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub original: String,
    pub optimized: String,
    pub improvements: Vec<String>,
    pub analysis: Analysis,
    /// Target model after default/fallback resolution
    pub target_model: TargetModel,
    pub usage: TokenUsage,
    pub timestamp: DateTime<Utc>,
}
