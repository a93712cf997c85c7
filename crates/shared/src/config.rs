//! Mapping definition files

use crate::FieldmapError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One renamed field: the consumer reads `consumer`, the producer wrote `producer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    /// Key the consumer expects
    pub consumer: String,

    /// Key the producer actually writes
    pub producer: String,
}

impl FieldRule {
    pub fn new(consumer: impl Into<String>, producer: impl Into<String>) -> Self {
        Self {
            consumer: consumer.into(),
            producer: producer.into(),
        }
    }
}

/// Declared mapping for one producer/consumer boundary (e.g. `users-api.yaml`)
///
/// Fields stay a list; duplicate consumer keys are rejected when the mapping
/// is built, not by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDefinition {
    /// Boundary identifier (e.g. "users-api")
    pub id: String,

    /// What sits on either side of the boundary
    #[serde(default)]
    pub description: Option<String>,

    /// Renamed fields
    #[serde(default)]
    pub fields: Vec<FieldRule>,
}

/// Supported definition file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Yaml,
    Json,
}

impl DefinitionFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

impl MappingDefinition {
    /// Create an empty definition
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: add a renamed field
    pub fn with_field(mut self, consumer: impl Into<String>, producer: impl Into<String>) -> Self {
        self.fields.push(FieldRule::new(consumer, producer));
        self
    }

    /// Parse a definition in the given format
    pub fn parse(content: &str, format: DefinitionFormat) -> crate::Result<Self> {
        let definition: Self = match format {
            DefinitionFormat::Yaml => serde_yaml::from_str(content)?,
            DefinitionFormat::Json => serde_json::from_str(content)?,
        };
        Ok(definition)
    }

    /// Load a definition from a YAML or JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let format = DefinitionFormat::from_path(path).ok_or_else(|| {
            FieldmapError::Config(format!(
                "Unsupported mapping file '{}': expected .yaml, .yml or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Consumer keys in declaration order
    pub fn consumer_keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.consumer.as_str()).collect()
    }
}

/// Snapshot of all definitions loaded from a directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingManifest {
    /// All loaded definitions
    pub mappings: Vec<MappingDefinition>,

    /// Manifest version
    pub version: String,

    /// When the manifest was generated
    pub generated_at: String,
}
