//! Server configuration
//!
//! Built once at startup from Shuttle secrets (falling back to the process
//! environment / `.env`) and injected into the application services.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use promptsmith::CompletionOptions;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_LLM_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONTENT_DIR: &str = "content/templates";

/// Deployment environment; error details are only exposed in development
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("development") | Some("dev") | Some("local") => Environment::Development,
            _ => Environment::Production,
        }
    }
}

/// Upstream completion API settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let options = CompletionOptions::default();
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub environment: Environment,
    /// Base64-encoded LLM API key, decoded per request
    pub encoded_api_key: Option<String>,
    pub llm: LlmConfig,
    pub content_dir: PathBuf,
}

impl ServerConfig {
    /// Build configuration from a key lookup (secrets store, environment, test map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LlmConfig::default();

        let llm = LlmConfig {
            base_url: lookup("LLM_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: lookup("LLM_MODEL").unwrap_or(defaults.model),
            max_tokens: parse_or(&lookup, "LLM_MAX_TOKENS", defaults.max_tokens),
            temperature: parse_or(&lookup, "LLM_TEMPERATURE", defaults.temperature),
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "LLM_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
        };

        Self {
            environment: Environment::parse(
                lookup("APP_ENV").or_else(|| lookup("NODE_ENV")).as_deref(),
            ),
            encoded_api_key: lookup("LLM_API_KEY"),
            llm,
            content_dir: lookup("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR)),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("⚠️  Invalid {} value {:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
