//! Test doubles shared by service and route tests

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use promptsmith::domain::services::CredentialResolver;
use promptsmith::{
    ApiCredential, ChatMessage, CompletionOptions, CompletionResponse, DomainError, LlmProvider,
    TokenUsage,
};

use crate::adapters::FsContentRepository;
use crate::application::{ContentService, OptimizeService};
use crate::AppState;

/// LLM provider that returns a canned reply and records what it was sent
pub struct ScriptedProvider {
    reply: Result<String, (Option<u16>, String)>,
    calls: AtomicUsize,
    last_message: Mutex<Option<String>>,
    last_key: Mutex<Option<String>>,
}

impl ScriptedProvider {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::with(Ok(text.into())))
    }

    pub fn failing(status: Option<u16>, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::with(Err((status, body.into()))))
    }

    fn with(reply: Result<String, (Option<u16>, String)>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_message: Mutex::new(None),
            last_key: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_message(&self) -> Option<String> {
        self.last_message.lock().unwrap().clone()
    }

    pub fn last_key(&self) -> Option<String> {
        self.last_key.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        credential: &ApiCredential,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(credential.expose().to_string());
        *self.last_message.lock().unwrap() = messages.last().map(|m| m.content.clone());

        match &self.reply {
            Ok(text) => Ok(CompletionResponse {
                content: text.clone(),
                model: "scripted-model".to_string(),
                usage: TokenUsage::new(120, 80),
                stop_reason: Some("end_turn".to_string()),
            }),
            Err((status, body)) => Err(DomainError::upstream(*status, body.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-model"
    }
}

/// base64 of "sk-ant-test"
pub const ENCODED_TEST_KEY: &str = "c2stYW50LXRlc3Q=";

/// A well-formed reply honoring the output contract
pub const WELL_FORMED_REPLY: &str = r#"Here you go:
{
  "optimizedPrompt": "You are a poet. Write a 3-line haiku about autumn leaves.",
  "improvements": ["Added a role", "Specified the form"],
  "analysis": {
    "originalScore": 40,
    "optimizedScore": 88,
    "keyStrengths": ["Clear topic"],
    "mainImprovements": ["Explicit structure"],
    "recommendedUsage": "Creative writing"
  }
}"#;

/// App state around a scripted provider, with an empty content store
pub fn test_state(
    provider: Arc<ScriptedProvider>,
    encoded_key: Option<&str>,
    development: bool,
) -> AppState {
    state_with(
        provider,
        encoded_key,
        development,
        Path::new("/nonexistent/promptsmith/content"),
    )
}

/// App state serving content from `content_dir`
pub fn content_state(content_dir: &Path) -> AppState {
    state_with(
        ScriptedProvider::replying(WELL_FORMED_REPLY),
        Some(ENCODED_TEST_KEY),
        false,
        content_dir,
    )
}

fn state_with(
    provider: Arc<ScriptedProvider>,
    encoded_key: Option<&str>,
    development: bool,
    content_dir: &Path,
) -> AppState {
    AppState {
        optimize_service: Arc::new(OptimizeService::new(
            provider,
            CredentialResolver::new(encoded_key.map(str::to_string)),
            CompletionOptions::default(),
        )),
        content_service: Arc::new(ContentService::new(Arc::new(FsContentRepository::new(
            content_dir,
        )))),
        expose_error_details: development,
    }
}
