//! Domain Services
//!
//! Pure functions over domain types:
//! - `credentials`: Credential Resolver
//! - `guidelines`: Model Guideline Table
//! - `meta_prompt`: Meta-Prompt Builder
//! - `result_parser`: tiered Result Parser

pub mod credentials;
pub mod guidelines;
pub mod meta_prompt;
pub mod result_parser;

pub use credentials::CredentialResolver;
pub use guidelines::guidelines_for;
pub use meta_prompt::build_meta_prompt;
pub use result_parser::{parse_reply, ParseReport, ParsedReply, Tier};
