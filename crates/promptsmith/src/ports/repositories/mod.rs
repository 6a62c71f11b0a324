//! Repository Ports
//!
//! Abstract interfaces for data access operations.

mod content_repository;

pub use content_repository::*;
