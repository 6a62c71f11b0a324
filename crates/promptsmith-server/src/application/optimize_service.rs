//! Optimize Application Service (Use Case)
//!
//! credential -> meta-prompt -> completion -> tolerant parse

use std::sync::Arc;

use promptsmith::domain::services::{build_meta_prompt, parse_reply, CredentialResolver};
use promptsmith::{
    ChatMessage, CompletionOptions, DomainError, LlmProvider, OptimizationRequest,
    OptimizationResult, TokenUsage,
};

/// What a successful optimization hands back to the route
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    pub result: OptimizationResult,
    pub usage: TokenUsage,
}

/// Application service for prompt optimization
pub struct OptimizeService {
    provider: Arc<dyn LlmProvider>,
    credentials: CredentialResolver,
    options: CompletionOptions,
}

impl OptimizeService {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        credentials: CredentialResolver,
        options: CompletionOptions,
    ) -> Self {
        Self {
            provider,
            credentials,
            options,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Run one optimization. The credential is resolved before any
    /// outbound call, so a configuration fault never reaches the provider.
    pub async fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationOutcome, DomainError> {
        let credential = self.credentials.resolve()?;
        let meta_prompt = build_meta_prompt(request);

        tracing::info!(
            target_model = %request.target_model,
            provider = self.provider.provider_name(),
            prompt_chars = request.prompt.chars().count(),
            "✨ Optimizing prompt"
        );

        let reply = self
            .provider
            .complete(&credential, &[ChatMessage::user(meta_prompt)], &self.options)
            .await?;

        let parsed = parse_reply(&reply.content, &request.prompt);
        if parsed.report.is_degraded() {
            tracing::warn!(
                optimized_prompt = ?parsed.report.optimized_prompt,
                improvements = ?parsed.report.improvements,
                analysis = ?parsed.report.analysis,
                reason = parsed.report.strict_failure.as_deref().unwrap_or("incomplete object"),
                reply_chars = reply.content.chars().count(),
                "⚠️  Reply did not match the output contract, recovered with fallbacks"
            );
        }

        tracing::info!(
            model = %reply.model,
            total_tokens = reply.usage.total_tokens,
            improvements = parsed.result.improvements.len(),
            "✅ Prompt optimized"
        );

        Ok(OptimizationOutcome {
            result: parsed.result,
            usage: reply.usage,
        })
    }
}
