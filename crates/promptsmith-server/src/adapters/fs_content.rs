//! Filesystem implementation of ContentRepository
//!
//! Records live as `{content_dir}/{slug}.json`. A missing file is "not found";
//! an unreadable or malformed one degrades to an empty record.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use promptsmith::{ContentRecord, ContentRepository, DomainError};

/// Content repository reading JSON files from a directory
pub struct FsContentRepository {
    root: PathBuf,
}

impl FsContentRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.json"))
    }
}

#[async_trait]
impl ContentRepository for FsContentRepository {
    async fn get_by_slug(&self, slug: &str) -> Result<Option<ContentRecord>, DomainError> {
        if !ContentRecord::is_valid_slug(slug) {
            return Ok(None);
        }

        let path = self.record_path(slug);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::warn!(slug, path = %path.display(), error = %e, "⚠️  Content file unreadable");
                return Ok(Some(ContentRecord::empty(slug)));
            }
        };

        match serde_json::from_str::<ContentRecord>(&raw) {
            Ok(mut record) => {
                record.slug = slug.to_string();
                Ok(Some(record))
            }
            Err(e) => {
                tracing::warn!(slug, path = %path.display(), error = %e, "⚠️  Malformed content file");
                Ok(Some(ContentRecord::empty(slug)))
            }
        }
    }

    async fn list_slugs(&self) -> Result<Vec<String>, DomainError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(DomainError::Repository(e.to_string())),
        };

        let mut slugs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if ContentRecord::is_valid_slug(stem) {
                    slugs.push(stem.to_string());
                }
            }
        }

        slugs.sort();
        Ok(slugs)
    }
}
