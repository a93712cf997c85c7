//! FieldAdapter - Applies a FieldMapping to records

use crate::FieldMapping;
use serde_json::Value;
use shared::{InvalidMappingError, MissingFieldError, Record};
use tracing::{debug, warn};

/// Exposes producer fields under the names a consumer expects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAdapter {
    mapping: FieldMapping,
}

impl FieldAdapter {
    /// Create an adapter for a validated mapping
    pub fn new(mapping: FieldMapping) -> Self {
        Self { mapping }
    }

    /// Get the underlying mapping
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Adapter for the opposite direction
    pub fn inverse(&self) -> Result<Self, InvalidMappingError> {
        Ok(Self::new(self.mapping.inverse()?))
    }

    /// Adapt a single record.
    ///
    /// Every mapped producer key must be present; otherwise nothing is
    /// returned but the error. Mapped producer keys are renamed, unmapped
    /// keys pass through untouched. Idempotent; the input is never modified
    /// and the only side effect is a `warn!` diagnostic when a mapped field
    /// replaces one already in the record.
    pub fn adapt(&self, record: &Record) -> Result<Record, MissingFieldError> {
        // Read everything from the input before writing, so swaps stay well defined
        let mut mapped = Vec::with_capacity(self.mapping.len());
        for rule in self.mapping.rules() {
            let value = record.get(&rule.producer).ok_or_else(|| MissingFieldError {
                consumer_key: rule.consumer.clone(),
                producer_key: rule.producer.clone(),
                record_index: None,
                available_fields: record.field_names(),
            })?;
            mapped.push((rule.consumer.as_str(), value.clone()));
        }

        let mut output: Record = record
            .iter()
            .filter(|(key, _)| !self.mapping.reads_producer_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        for (consumer_key, value) in mapped {
            if output.insert(consumer_key, value).is_some() {
                warn!(consumer_key, "mapped field overwrites a field already present in the record");
            }
        }

        Ok(output)
    }

    /// Adapt a sequence of records, preserving order and cardinality.
    ///
    /// Stops at the first record with a missing field; the error carries its index.
    pub fn adapt_all(&self, records: &[Record]) -> Result<Vec<Record>, MissingFieldError> {
        let adapted = records
            .iter()
            .enumerate()
            .map(|(index, record)| self.adapt(record).map_err(|e| e.at_index(index)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(records = adapted.len(), rules = self.mapping.len(), "adapted record sequence");
        Ok(adapted)
    }

    /// Adapt a JSON document: an object is one record, an array is a sequence of records
    pub fn adapt_value(&self, value: &Value) -> shared::Result<Value> {
        match value {
            Value::Array(items) => {
                let records = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| Record::from_value_at(item.clone(), Some(index)))
                    .collect::<Result<Vec<_>, _>>()?;

                let adapted = self.adapt_all(&records)?;
                Ok(Value::Array(adapted.into_iter().map(Value::from).collect()))
            }
            other => {
                let record = Record::try_from(other.clone())?;
                Ok(self.adapt(&record)?.into())
            }
        }
    }
}

impl From<FieldMapping> for FieldAdapter {
    fn from(mapping: FieldMapping) -> Self {
        Self::new(mapping)
    }
}
