//! Content DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Available template slugs
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlugListResponse {
    pub slugs: Vec<String>,
    pub count: usize,
}

impl From<Vec<String>> for SlugListResponse {
    fn from(slugs: Vec<String>) -> Self {
        Self {
            count: slugs.len(),
            slugs,
        }
    }
}
