//! FieldMapping - Validated consumer/producer key pairs

use shared::{FieldRule, InvalidMappingError, MappingDefinition};
use std::collections::{BTreeMap, HashSet};

/// Declared renames for one boundary.
///
/// Consumer keys are unique and no key is empty; both are checked once here so
/// adaptation never has to re-validate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    rules: Vec<FieldRule>,
}

impl FieldMapping {
    /// Build a mapping from `(consumer_key, producer_key)` pairs
    pub fn new<I, C, P>(pairs: I) -> Result<Self, InvalidMappingError>
    where
        I: IntoIterator<Item = (C, P)>,
        C: Into<String>,
        P: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(consumer, producer)| FieldRule::new(consumer, producer))
            .collect();
        Self::from_rules(rules)
    }

    /// Build a mapping from already parsed rules
    pub fn from_rules(rules: Vec<FieldRule>) -> Result<Self, InvalidMappingError> {
        let mut seen = HashSet::with_capacity(rules.len());

        for rule in &rules {
            if rule.consumer.is_empty() || rule.producer.is_empty() {
                return Err(InvalidMappingError::EmptyKey {
                    consumer_key: rule.consumer.clone(),
                    producer_key: rule.producer.clone(),
                });
            }

            if !seen.insert(rule.consumer.as_str()) {
                return Err(InvalidMappingError::DuplicateConsumerKey {
                    consumer_key: rule.consumer.clone(),
                });
            }
        }

        Ok(Self { rules })
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Producer key read for a consumer key
    pub fn producer_for(&self, consumer_key: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.consumer == consumer_key)
            .map(|r| r.producer.as_str())
    }

    /// Whether a key is read from the producer by any rule
    pub fn reads_producer_key(&self, key: &str) -> bool {
        self.rules.iter().any(|r| r.producer == key)
    }

    /// Whether a key is written for the consumer by any rule
    pub fn writes_consumer_key(&self, key: &str) -> bool {
        self.rules.iter().any(|r| r.consumer == key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Mapping for the opposite direction (consumer writes back to producer).
    ///
    /// Fails when two consumer keys read the same producer key, since the
    /// inverse would declare that producer key twice.
    pub fn inverse(&self) -> Result<Self, InvalidMappingError> {
        let mut by_producer: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for rule in &self.rules {
            by_producer
                .entry(rule.producer.as_str())
                .or_default()
                .push(rule.consumer.clone());
        }

        if let Some((producer, consumers)) = by_producer.into_iter().find(|(_, c)| c.len() > 1) {
            return Err(InvalidMappingError::NotInvertible {
                producer_key: producer.to_string(),
                consumer_keys: consumers,
            });
        }

        Self::from_rules(
            self.rules
                .iter()
                .map(|r| FieldRule::new(r.producer.clone(), r.consumer.clone()))
                .collect(),
        )
    }
}

impl TryFrom<&MappingDefinition> for FieldMapping {
    type Error = InvalidMappingError;

    fn try_from(definition: &MappingDefinition) -> Result<Self, Self::Error> {
        Self::from_rules(definition.fields.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_construction() {
        let mapping = FieldMapping::new([("firstName", "userName")]).unwrap();

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.producer_for("firstName"), Some("userName"));
        assert_eq!(mapping.producer_for("userName"), None);
        assert!(mapping.reads_producer_key("userName"));
        assert!(mapping.writes_consumer_key("firstName"));
    }

    #[test]
    fn test_shared_producer_key_is_allowed() {
        let mapping = FieldMapping::new([("firstName", "userName"), ("displayName", "userName")]);
        assert!(mapping.is_ok());
    }

    #[test]
    fn test_duplicate_consumer_key_rejected() {
        let err = FieldMapping::new([("firstName", "userName"), ("firstName", "nickName")]).unwrap_err();

        assert_eq!(
            err,
            InvalidMappingError::DuplicateConsumerKey {
                consumer_key: "firstName".to_string()
            }
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = FieldMapping::new([("", "userName")]).unwrap_err();
        assert!(matches!(err, InvalidMappingError::EmptyKey { .. }));

        let err = FieldMapping::new([("firstName", "")]).unwrap_err();
        assert!(matches!(err, InvalidMappingError::EmptyKey { .. }));
    }

    #[test]
    fn test_empty_mapping_is_valid() {
        let mapping = FieldMapping::new(Vec::<(String, String)>::new()).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_inverse() {
        let mapping = FieldMapping::new([("firstName", "userName"), ("userId", "id")]).unwrap();
        let inverse = mapping.inverse().unwrap();

        assert_eq!(inverse.producer_for("userName"), Some("firstName"));
        assert_eq!(inverse.producer_for("id"), Some("userId"));
        assert_eq!(inverse.inverse().unwrap(), mapping);
    }

    #[test]
    fn test_inverse_rejects_shared_producer_key() {
        let mapping = FieldMapping::new([("firstName", "userName"), ("displayName", "userName")]).unwrap();

        match mapping.inverse().unwrap_err() {
            InvalidMappingError::NotInvertible {
                producer_key,
                consumer_keys,
            } => {
                assert_eq!(producer_key, "userName");
                assert_eq!(consumer_keys, vec!["firstName".to_string(), "displayName".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_definition() {
        let definition = MappingDefinition::new("users-api")
            .with_field("firstName", "userName")
            .with_field("firstName", "nickName");

        assert!(FieldMapping::try_from(&definition).is_err());
    }
}
