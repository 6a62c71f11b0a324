//! Credential Resolver
//!
//! Decodes the base64-encoded API key injected at construction time.
//! Absence and malformed encodings both fail closed.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::domain::{errors::DomainError, ApiCredential};

/// Resolves the LLM credential from its stored (base64) form
#[derive(Clone, Default)]
pub struct CredentialResolver {
    encoded: Option<String>,
}

impl CredentialResolver {
    pub fn new(encoded: Option<String>) -> Self {
        Self { encoded }
    }

    pub fn is_configured(&self) -> bool {
        self.encoded
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Decode the credential. Called once per request; the result is not cached.
    pub fn resolve(&self) -> Result<ApiCredential, DomainError> {
        let encoded = self
            .encoded
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| DomainError::Configuration("LLM API key is not configured".into()))?;

        let bytes = STANDARD.decode(encoded).map_err(|e| {
            DomainError::Configuration(format!("LLM API key is not valid base64: {e}"))
        })?;

        let decoded = String::from_utf8(bytes).map_err(|_| {
            DomainError::Configuration("LLM API key does not decode to UTF-8".into())
        })?;

        let secret = decoded.trim();
        if secret.is_empty() {
            return Err(DomainError::Configuration(
                "LLM API key decodes to an empty value".into(),
            ));
        }

        Ok(ApiCredential::new(secret.to_string()))
    }
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("configured", &self.is_configured())
            .finish()
    }
}
