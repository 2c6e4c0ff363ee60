// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory key-value source.
//!
//! Used for explicit overrides and for native string maps handed over by the
//! caller.

use crate::domain::{ConfigKey, Result};
use crate::ports::ConfigSource;
use std::collections::HashMap;

/// A named, in-memory configuration source.
///
/// # Examples
///
/// ```rust
/// use envaware::adapters::MapSource;
/// use envaware::domain::ConfigKey;
/// use envaware::ports::ConfigSource;
///
/// let source = MapSource::new("overrides").with_value("k9", "k9v");
/// assert_eq!(source.get(&ConfigKey::from("k9")).unwrap().as_deref(), Some("k9v"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    name: String,
    values: HashMap<String, String>,
}

impl MapSource {
    /// Creates an empty source with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Creates a source from an existing map.
    pub fn from_map(name: impl Into<String>, values: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Adds a value, replacing any earlier value for the key.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Removes a value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the source has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the underlying map.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }
}

impl ConfigSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }

    fn entries(&self) -> Result<Vec<(ConfigKey, Option<String>)>> {
        Ok(self
            .values
            .iter()
            .map(|(k, v)| (ConfigKey::from(k.as_str()), Some(v.clone())))
            .collect())
    }
}
