//! Anthropic Messages API provider
//!
//! Implements the `LlmProvider` port with reqwest. Every failure, including
//! an empty completion, is reported as `DomainError::Upstream`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use promptsmith::{
    ApiCredential, ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider,
    MessageRole, TokenUsage,
};

use crate::config::LlmConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// LLM provider backed by the Anthropic Messages API
#[derive(Clone)]
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl AnthropicProvider {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: config.timeout,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: WireUsage,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
struct WireUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(
        &self,
        credential: &ApiCredential,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = build_request(&self.model, messages, options);

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", credential.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body));
        }

        let payload: MessagesResponse = response.json().await.map_err(|e| {
            DomainError::upstream(Some(status.as_u16()), format!("Undecodable response: {e}"))
        })?;

        let content = extract_text(&payload.content);
        if content.trim().is_empty() {
            return Err(DomainError::upstream(
                Some(status.as_u16()),
                "Completion contained no text",
            ));
        }

        tracing::debug!(
            model = payload.model.as_deref().unwrap_or(&self.model),
            stop_reason = payload.stop_reason.as_deref().unwrap_or("unknown"),
            input_tokens = payload.usage.input_tokens,
            output_tokens = payload.usage.output_tokens,
            "Anthropic completion received"
        );

        Ok(CompletionResponse {
            content,
            model: payload.model.unwrap_or_else(|| self.model.clone()),
            usage: TokenUsage::new(payload.usage.input_tokens, payload.usage.output_tokens),
            stop_reason: payload.stop_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================
// Helper Functions
// ============================================

/// System messages go to the top-level `system` field; the Messages API
/// only accepts user/assistant turns in `messages`.
fn build_request<'a>(
    model: &'a str,
    messages: &'a [ChatMessage],
    options: &CompletionOptions,
) -> MessagesRequest<'a> {
    let system: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == MessageRole::System)
        .map(|m| m.content.as_str())
        .collect();

    let turns = messages
        .iter()
        .filter_map(|m| match m.role {
            MessageRole::System => None,
            MessageRole::User => Some(WireMessage {
                role: "user",
                content: &m.content,
            }),
            MessageRole::Assistant => Some(WireMessage {
                role: "assistant",
                content: &m.content,
            }),
        })
        .collect();

    MessagesRequest {
        model,
        max_tokens: options.max_tokens,
        temperature: options.temperature,
        system: (!system.is_empty()).then(|| system.join("\n\n")),
        messages: turns,
    }
}

fn extract_text(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .filter(|block| block.kind.as_deref().map_or(true, |kind| kind == "text"))
        .filter_map(|block| block.text.as_deref())
        .collect::<Vec<_>>()
        .join("")
}

fn map_transport_error(err: reqwest::Error, timeout: Duration) -> DomainError {
    if err.is_timeout() {
        DomainError::upstream(
            None,
            format!("Request timed out after {}ms", timeout.as_millis()),
        )
    } else if err.is_connect() {
        DomainError::upstream(None, format!("Connection failed: {err}"))
    } else {
        DomainError::upstream(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

fn map_http_error(status: StatusCode, body: String) -> DomainError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or(body);

    DomainError::upstream(Some(status.as_u16()), message)
}
