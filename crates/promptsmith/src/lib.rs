//! Promptsmith Domain Library
//!
//! Core domain types and interfaces for the prompt optimization service.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (OptimizationRequest, OptimizationResult, ContentRecord)
//!   - `value_objects/`: Immutable value types (TargetModel, OptimizationSettings, ApiCredential)
//!   - `services/`: Credential resolver, guideline table, meta-prompt builder, result parser
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Content access interfaces
//!   - `services/`: External service interfaces (LLM provider)
//!
//! # Usage
//!
//! ```rust,ignore
//! use promptsmith::domain::services::{build_meta_prompt, parse_reply};
//! use promptsmith::{OptimizationRequest, OptimizationSettings, TargetModel};
//!
//! let request = OptimizationRequest::new("write a haiku", TargetModel::Anthropic, OptimizationSettings::default())?;
//! let meta_prompt = build_meta_prompt(&request);
//! // ... send meta_prompt to an LlmProvider ...
//! let parsed = parse_reply(&reply.content, &request.prompt);
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Analysis, ApiCredential, ContentRecord, DomainError, OptimizationRequest, OptimizationResult,
    OptimizationSettings, TargetModel,
};
pub use ports::{
    ChatMessage, CompletionOptions, CompletionResponse, ContentRepository, LlmProvider,
    MessageRole, TokenUsage,
};
