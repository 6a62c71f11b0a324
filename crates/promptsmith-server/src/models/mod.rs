//! Promptsmith HTTP Models
//!
//! - Optimize: request body and success envelope of `/api/optimize-prompt`
//! - Content: template listing
//! - Error: the shared error envelope

mod content;
mod error;
mod optimize;

pub use content::*;
pub use error::*;
pub use optimize::*;
