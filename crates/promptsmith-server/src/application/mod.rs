//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod content_service;
mod optimize_service;

pub use content_service::ContentService;
pub use optimize_service::{OptimizationOutcome, OptimizeService};
