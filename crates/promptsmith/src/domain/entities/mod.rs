//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Optimization: request, result and analysis of a prompt optimization
//! - Content: slug-keyed SEO template records

mod content;
mod optimization;

pub use content::*;
pub use optimization::*;
