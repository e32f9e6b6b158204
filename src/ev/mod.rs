//! Encoded edge attributes and the registry that resolves their labels.
//!
//! Edges carry a fixed set of semantic attributes (road class, road
//! environment, speed). The [`EncodingManager`] is the lookup service that
//! maps attribute keys and wire labels to typed values. It is read-only
//! after construction and safe to share between request workers.

mod road_class;
mod road_environment;

pub use road_class::RoadClass;
pub use road_environment::RoadEnvironment;

use crate::error::NavError;

/// A resolved value of one of the known enumerated attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedValue {
    RoadClass(RoadClass),
    RoadEnvironment(RoadEnvironment),
}

/// Registry of encoded values known to the graph.
///
/// The enumerated attributes are compiled in; auxiliary numeric keys (for
/// example `max_speed`) are registered by the engine that owns the graph.
#[derive(Debug, Clone, Default)]
pub struct EncodingManager {
    extra_keys: Vec<&'static str>,
}

impl EncodingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an auxiliary encoded value key.
    pub fn with_encoded_value(mut self, key: &'static str) -> Self {
        if !self.extra_keys.contains(&key) {
            self.extra_keys.push(key);
        }
        self
    }

    /// Resolve `label` against the enumeration stored under `attr_key`.
    ///
    /// Unknown attributes and unknown labels are configuration errors,
    /// raised here so that traversal never sees an unresolved value.
    pub fn value_of(&self, attr_key: &str, label: &str) -> Result<EncodedValue, NavError> {
        let unknown = || NavError::Configuration {
            key: attr_key.to_string(),
            value: label.to_string(),
        };
        if attr_key == RoadClass::KEY {
            RoadClass::from_label(label)
                .map(EncodedValue::RoadClass)
                .ok_or_else(unknown)
        } else if attr_key == RoadEnvironment::KEY {
            RoadEnvironment::from_label(label)
                .map(EncodedValue::RoadEnvironment)
                .ok_or_else(unknown)
        } else {
            Err(unknown())
        }
    }

    /// Whether the graph encodes a value under `key`.
    pub fn has_encoded_value(&self, key: &str) -> bool {
        key == RoadClass::KEY || key == RoadEnvironment::KEY || self.extra_keys.contains(&key)
    }

    /// Valid wire labels for an enumerated attribute.
    pub fn labels(&self, attr_key: &str) -> Option<Vec<&'static str>> {
        if attr_key == RoadClass::KEY {
            Some(RoadClass::ALL.iter().map(|rc| rc.label()).collect())
        } else if attr_key == RoadEnvironment::KEY {
            Some(RoadEnvironment::ALL.iter().map(|re| re.label()).collect())
        } else {
            None
        }
    }
}
