//! Promptsmith API Client

use anyhow::{bail, Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use promptsmith::{Analysis, OptimizationSettings, TargetModel, TokenUsage};

/// API Client for Promptsmith
pub struct PromptsmithClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Request/Response Types
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_model: Option<TargetModel>,
    pub optimization_settings: OptimizationSettings,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub original: String,
    pub optimized: String,
    pub improvements: Vec<String>,
    pub analysis: Analysis,
    pub target_model: TargetModel,
    pub usage: TokenUsage,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct SlugListResponse {
    pub slugs: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

impl PromptsmithClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Optimize a prompt
    pub async fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse> {
        let url = format!("{}/api/optimize-prompt", self.base_url);
        tracing::debug!(%url, target = ?request.target_model, "Sending optimize request");

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to connect to Promptsmith API")?;

        let resp = ensure_success(resp).await?;
        resp.json().await.context("Failed to parse response")
    }

    /// List template slugs
    pub async fn list_templates(&self) -> Result<SlugListResponse> {
        let url = format!("{}/api/templates", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to Promptsmith API")?;

        let resp = ensure_success(resp).await?;
        resp.json().await.context("Failed to parse response")
    }

    /// Get a template record as raw JSON
    pub async fn get_template(&self, slug: &str) -> Result<serde_json::Value> {
        let url = format!(
            "{}/api/templates/{}",
            self.base_url,
            urlencoding::encode(slug)
        );
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to Promptsmith API")?;

        let resp = ensure_success(resp).await?;
        resp.json().await.context("Failed to parse response")
    }
}

async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    bail!("{}", api_error_message(status, &body));
}

/// Render a non-2xx reply, preferring the server's error envelope
fn api_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error,
            details: Some(details),
        }) => format!("API error ({}): {} - {}", status, error, details),
        Ok(ErrorEnvelope { error, .. }) => format!("API error ({}): {}", status, error),
        Err(_) => format!("API error ({}): {}", status, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_uses_envelope() {
        let msg = api_error_message(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Prompt is required"}"#,
        );
        assert_eq!(msg, "API error (400 Bad Request): Prompt is required");

        let msg = api_error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Failed to optimize prompt","details":"Upstream failure (HTTP 503): overloaded"}"#,
        );
        assert!(msg.ends_with("Failed to optimize prompt - Upstream failure (HTTP 503): overloaded"));
    }

    #[test]
    fn test_api_error_message_raw_body() {
        let msg = api_error_message(StatusCode::BAD_GATEWAY, "bad gateway");
        assert_eq!(msg, "API error (502 Bad Gateway): bad gateway");
    }

    #[test]
    fn test_optimize_request_wire_shape() {
        let request = OptimizeRequest {
            prompt: "hello".to_string(),
            target_model: Some(TargetModel::Google),
            optimization_settings: OptimizationSettings {
                include_examples: false,
                ..OptimizationSettings::default()
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["targetModel"], "google");
        assert_eq!(json["optimizationSettings"]["includeExamples"], false);
        assert_eq!(json["optimizationSettings"]["addStructure"], true);
    }

    #[test]
    fn test_optimize_response_parses_server_envelope() {
        let body = r#"{
            "original": "hi",
            "optimized": "Say hello politely.",
            "improvements": ["Clarified tone"],
            "analysis": {
                "originalScore": 60,
                "optimizedScore": 85,
                "keyStrengths": ["Clear objective"],
                "mainImprovements": ["Enhanced clarity and specificity"],
                "recommendedUsage": "General chat"
            },
            "targetModel": "openai",
            "usage": {"inputTokens": 10, "outputTokens": 5, "totalTokens": 15},
            "timestamp": "2024-01-01T00:00:00Z"
        }"#;
        let resp: OptimizeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.target_model, TargetModel::OpenAI);
        assert_eq!(resp.analysis.optimized_score, 85);
        assert_eq!(resp.usage.total_tokens, 15);
    }
}
