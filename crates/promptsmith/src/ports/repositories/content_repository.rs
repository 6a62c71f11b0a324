//! Content Repository Port
//!
//! Read-only, slug-keyed access to SEO template records.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, ContentRecord};

/// Repository interface for content records
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Find a record by slug. `Ok(None)` when no record exists.
    ///
    /// A record that exists but cannot be read or decoded comes back as
    /// [`ContentRecord::empty`], never as a partial shape.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<ContentRecord>, DomainError>;

    /// List all slugs, sorted
    async fn list_slugs(&self) -> Result<Vec<String>, DomainError>;
}
