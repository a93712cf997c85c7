//! # Fieldmap Shared
//!
//! Common types used across all Fieldmap packages.

pub mod error;
pub mod record;
pub mod config;

// Re-exports
pub use error::*;
pub use record::*;
pub use config::*;
