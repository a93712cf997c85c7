//! # Fieldmap Mappings
//!
//! Loads mapping definition files (`*.yaml`, `*.yml`, `*.json`) from disk.

pub mod loader;

pub use loader::{MappingLoader, SkippedFile};
