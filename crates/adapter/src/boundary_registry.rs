//! BoundaryRegistry - Named mappings, one per producer/consumer boundary

use crate::{FieldAdapter, FieldMapping};
use shared::{BoundaryNotFoundError, FieldmapError, MappingDefinition, MappingManifest, Record};
use std::collections::BTreeMap;
use tracing::debug;

/// Holds one adapter per boundary id
#[derive(Debug, Default)]
pub struct BoundaryRegistry {
    boundaries: BTreeMap<String, FieldAdapter>,
}

impl BoundaryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the mapping for a boundary
    pub fn register(&mut self, id: impl Into<String>, mapping: FieldMapping) {
        let id = id.into();
        debug!(boundary = %id, rules = mapping.len(), "registered boundary");
        self.boundaries.insert(id, FieldAdapter::new(mapping));
    }

    /// Validate and register a definition
    pub fn register_definition(&mut self, definition: &MappingDefinition) -> shared::Result<()> {
        let mapping = FieldMapping::try_from(definition).map_err(|source| FieldmapError::InvalidDefinition {
            id: definition.id.clone(),
            source,
        })?;
        self.register(definition.id.clone(), mapping);
        Ok(())
    }

    /// Register every definition, stopping at the first invalid one
    pub fn load_definitions<'a>(
        &mut self,
        definitions: impl IntoIterator<Item = &'a MappingDefinition>,
    ) -> shared::Result<()> {
        for definition in definitions {
            self.register_definition(definition)?;
        }
        Ok(())
    }

    /// Build a registry from a loaded manifest
    pub fn from_manifest(manifest: &MappingManifest) -> shared::Result<Self> {
        let mut registry = Self::new();
        registry.load_definitions(&manifest.mappings)?;
        Ok(registry)
    }

    /// Get the adapter for a boundary
    pub fn get(&self, id: &str) -> Option<&FieldAdapter> {
        self.boundaries.get(id)
    }

    /// Get the adapter for a boundary, or an error naming the known boundaries
    pub fn adapter(&self, id: &str) -> Result<&FieldAdapter, BoundaryNotFoundError> {
        self.boundaries.get(id).ok_or_else(|| BoundaryNotFoundError {
            boundary_id: id.to_string(),
            available_boundaries: self.boundaries.keys().cloned().collect(),
        })
    }

    /// Registered boundary ids (sorted)
    pub fn ids(&self) -> Vec<&str> {
        self.boundaries.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Adapt one record across a boundary
    pub fn adapt(&self, id: &str, record: &Record) -> shared::Result<Record> {
        Ok(self.adapter(id)?.adapt(record)?)
    }

    /// Adapt a sequence of records across a boundary
    pub fn adapt_all(&self, id: &str, records: &[Record]) -> shared::Result<Vec<Record>> {
        Ok(self.adapter(id)?.adapt_all(records)?)
    }
}
