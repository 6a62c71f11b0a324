//! Optimization - request and result of a prompt optimization
//!
//! Pure domain entities without infrastructure dependencies.
//! Nothing here is persisted; both live for a single request.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{errors::DomainError, OptimizationSettings, TargetModel};

/// A fully resolved optimization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationRequest {
    pub prompt: String,
    pub target_model: TargetModel,
    pub settings: OptimizationSettings,
}

impl OptimizationRequest {
    /// Create a request, rejecting an empty (or whitespace-only) prompt
    pub fn new(
        prompt: impl Into<String>,
        target_model: TargetModel,
        settings: OptimizationSettings,
    ) -> Result<Self, DomainError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(DomainError::Validation("Prompt is required".into()));
        }

        Ok(Self {
            prompt,
            target_model,
            settings,
        })
    }
}

/// Structured result returned to the caller; always fully populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub optimized_prompt: String,
    pub improvements: Vec<String>,
    pub analysis: Analysis,
}

/// Quality analysis of the original vs optimized prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Score of the original prompt (0-100)
    pub original_score: u8,
    /// Score of the optimized prompt (0-100)
    pub optimized_score: u8,
    pub key_strengths: Vec<String>,
    pub main_improvements: Vec<String>,
    pub recommended_usage: String,
}
