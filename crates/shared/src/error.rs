//! Error types for Fieldmap

use thiserror::Error;

fn describe_index(record_index: &Option<usize>) -> String {
    match record_index {
        Some(index) => format!(" #{}", index),
        None => String::new(),
    }
}

/// Error returned when a producer field declared by a mapping is absent from a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Field '{producer_key}' (read as '{consumer_key}') is missing from record{}. Available fields: {}",
    describe_index(record_index),
    available_fields.join(", ")
)]
pub struct MissingFieldError {
    pub consumer_key: String,
    pub producer_key: String,
    /// Position of the record when adapting a sequence
    pub record_index: Option<usize>,
    pub available_fields: Vec<String>,
}

impl MissingFieldError {
    /// Attach the position of the failing record within a sequence
    pub fn at_index(mut self, index: usize) -> Self {
        self.record_index = Some(index);
        self
    }
}

/// Error returned when a mapping cannot be constructed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMappingError {
    #[error("Consumer key '{consumer_key}' is declared more than once")]
    DuplicateConsumerKey { consumer_key: String },

    #[error("Mapping keys must not be empty (consumer '{consumer_key}', producer '{producer_key}')")]
    EmptyKey {
        consumer_key: String,
        producer_key: String,
    },

    #[error(
        "Mapping cannot be inverted: producer key '{producer_key}' is read by several consumer keys: {}",
        consumer_keys.join(", ")
    )]
    NotInvertible {
        producer_key: String,
        consumer_keys: Vec<String>,
    },
}

/// Error returned when no mapping is registered for a boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Boundary '{boundary_id}' not found. Available boundaries: {}", available_boundaries.join(", "))]
pub struct BoundaryNotFoundError {
    pub boundary_id: String,
    pub available_boundaries: Vec<String>,
}

/// Error returned when a JSON value is not an object where a record is required
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Expected a JSON object for record{}, found {found}", describe_index(record_index))]
pub struct NotARecordError {
    pub found: &'static str,
    pub record_index: Option<usize>,
}

/// General Fieldmap error type
#[derive(Debug, Error)]
pub enum FieldmapError {
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),

    #[error(transparent)]
    InvalidMapping(#[from] InvalidMappingError),

    #[error("Mapping '{id}' is invalid: {source}")]
    InvalidDefinition {
        id: String,
        #[source]
        source: InvalidMappingError,
    },

    #[error(transparent)]
    BoundaryNotFound(#[from] BoundaryNotFoundError),

    #[error(transparent)]
    NotARecord(#[from] NotARecordError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, FieldmapError>;
