//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod credential;
mod optimization_settings;
mod target_model;

pub use credential::*;
pub use optimization_settings::*;
pub use target_model::*;
