//! Promptsmith API Routes
//!
//! - /api/optimize-prompt - Prompt optimization (POST only)
//! - /api/templates - SEO template content

pub mod content;
pub mod optimize;
pub mod swagger;
