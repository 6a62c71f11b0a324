//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod anthropic;
pub mod fs_content;

// Re-exports
pub use anthropic::AnthropicProvider;
pub use fs_content::FsContentRepository;
