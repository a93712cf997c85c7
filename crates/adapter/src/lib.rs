//! # Fieldmap Adapter
//!
//! Reconciles field naming between a producer and a consumer of records.
//!
//! ## Components
//!
//! - `FieldMapping` - Validated `consumerKey -> producerKey` pairs
//! - `FieldAdapter` - Applies a mapping to records and sequences of records
//! - `BoundaryRegistry` - Named mappings, one per producer/consumer boundary
//!
//! Adapter operations are idempotent: identical inputs produce identical
//! outputs and inputs are never modified. Their only side effects are
//! `tracing` diagnostics.

pub mod field_mapping;
pub mod field_adapter;
pub mod boundary_registry;

pub use field_mapping::FieldMapping;
pub use field_adapter::FieldAdapter;
pub use boundary_registry::BoundaryRegistry;
