//! TargetModel - AI platform family a prompt is tailored for

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Target model family
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TargetModel {
    #[default]
    OpenAI,
    Anthropic,
    Google,
    Image,
}

impl TargetModel {
    pub const ALL: [TargetModel; 4] = [
        TargetModel::OpenAI,
        TargetModel::Anthropic,
        TargetModel::Google,
        TargetModel::Image,
    ];

    /// Resolve a caller-supplied identifier, degrading to the default family
    /// when absent or unrecognized.
    pub fn resolve(value: Option<&str>) -> Self {
        match value {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(target_model = raw, "Unknown target model, using default");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetModel::OpenAI => "openai",
            TargetModel::Anthropic => "anthropic",
            TargetModel::Google => "google",
            TargetModel::Image => "image",
        }
    }

    /// Human readable family name used inside meta-prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetModel::OpenAI => "OpenAI GPT models",
            TargetModel::Anthropic => "Anthropic Claude models",
            TargetModel::Google => "Google Gemini models",
            TargetModel::Image => "image generation models (Midjourney, DALL-E, Stable Diffusion)",
        }
    }
}

impl std::fmt::Display for TargetModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" | "chatgpt" => Ok(TargetModel::OpenAI),
            "anthropic" | "claude" => Ok(TargetModel::Anthropic),
            "google" | "gemini" => Ok(TargetModel::Google),
            "image" | "midjourney" | "dall-e" | "dalle" | "stable-diffusion" => {
                Ok(TargetModel::Image)
            }
            _ => Err(format!(
                "Unknown target model: {}. Valid: openai, anthropic, google, image",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_models() {
        assert_eq!(TargetModel::resolve(Some("anthropic")), TargetModel::Anthropic);
        assert_eq!(TargetModel::resolve(Some("Google")), TargetModel::Google);
        assert_eq!(TargetModel::resolve(Some(" image ")), TargetModel::Image);
        assert_eq!(TargetModel::resolve(Some("claude")), TargetModel::Anthropic);
    }

    #[test]
    fn test_resolve_falls_back_to_openai() {
        assert_eq!(TargetModel::resolve(None), TargetModel::OpenAI);
        assert_eq!(TargetModel::resolve(Some("unknown-xyz")), TargetModel::OpenAI);
        assert_eq!(TargetModel::resolve(Some("")), TargetModel::OpenAI);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for model in TargetModel::ALL {
            assert_eq!(model.to_string().parse::<TargetModel>(), Ok(model));
        }
    }
}
