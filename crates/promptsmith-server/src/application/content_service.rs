//! Content Application Service (Use Case)
//!
//! Read-only access to slug-keyed template records.

use std::sync::Arc;

use promptsmith::{ContentRecord, ContentRepository, DomainError};

/// Application service for content lookups
pub struct ContentService<R: ContentRepository> {
    repo: Arc<R>,
}

impl<R: ContentRepository> ContentService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Get a record by slug
    pub async fn get(&self, slug: &str) -> Result<ContentRecord, DomainError> {
        self.repo
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found_str("Template", slug))
    }

    /// List all known slugs, sorted
    pub async fn list(&self) -> Result<Vec<String>, DomainError> {
        self.repo.list_slugs().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FsContentRepository;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let service = ContentService::new(Arc::new(FsContentRepository::new(dir.path())));

        let err = service.get("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("claude-prompts.json"), r#"{"title":"Claude"}"#).unwrap();
        let service = ContentService::new(Arc::new(FsContentRepository::new(dir.path())));

        assert_eq!(service.get("claude-prompts").await.unwrap().title, "Claude");
        assert_eq!(service.list().await.unwrap(), vec!["claude-prompts"]);
    }
}
