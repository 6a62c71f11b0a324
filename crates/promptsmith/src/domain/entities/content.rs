//! ContentRecord - SEO template page data
//!
//! Every field defaults, so a missing or malformed source degrades to an
//! empty record rather than a partial shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A slug-keyed content record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContentRecord {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Remaining top-level fields, kept verbatim
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

impl ContentRecord {
    /// Empty record for a slug
    pub fn empty(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }

    /// Whether a slug is safe to use as a file stem
    pub fn is_valid_slug(slug: &str) -> bool {
        let mut chars = slug.chars();
        match chars.next() {
            Some(first) if first.is_ascii_lowercase() || first.is_ascii_digit() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}
