// crates/veritas-core/src/lib.rs
//
// veritas-core: Core types, traits, and configuration for the Veritas
// content-validation network.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the canonical data structures, error types, store traits, and
// runtime configuration used throughout the validation pipeline.

pub mod config;
pub mod content;
pub mod dispute;
pub mod error;
pub mod traits;
pub mod validator;
pub mod vote;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use veritas_core::ContentItem;`

// Content types
pub use content::{ContentItem, ContentStatus};

// Validator types
pub use validator::Validator;

// Vote types
pub use vote::VoteRecord;

// Dispute types
pub use dispute::{Dispute, DisputeStatus};

// Configuration
pub use config::ValidationConfig;

// Error type
pub use error::VeritasError;

// Traits
pub use traits::{ContentStore, DisputeStore, ValidationStore, ValidatorStore, VoteStore};
