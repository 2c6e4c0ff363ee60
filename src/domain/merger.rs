// SPDX-License-Identifier: MIT OR Apache-2.0

//! Priority merging of key-value sources.
//!
//! Sources are merged with "first source wins" semantics: a key keeps the value
//! of the earliest source that defines it. Primary sources are merged before
//! fallback sources, so a fallback (process properties, environment) only ever
//! fills gaps. Keys that no primary source mentions are remembered as
//! *fallback-only*; they serve as placeholder targets but are not exposed as
//! resolved entries.

use crate::domain::Result;
use crate::ports::{ConfigSource, Lookup};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// The merged-but-unresolved view of a source chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedSources {
    values: HashMap<String, String>,
    keys: Vec<String>,
    fallback_only: HashSet<String>,
}

impl MergedSources {
    /// Returns the merged values, primary values taking precedence.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Returns the merged (unresolved) value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the key universe: every key of every source, in first-seen order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the keys introduced only by fallback sources.
    pub fn fallback_only(&self) -> &HashSet<String> {
        &self.fallback_only
    }

    /// Returns true if `key` was introduced only by a fallback source.
    pub fn is_fallback_only(&self, key: &str) -> bool {
        self.fallback_only.contains(key)
    }

    /// Splits off the values of fallback-only keys.
    pub fn fallback_values(&self) -> HashMap<String, String> {
        self.fallback_only
            .iter()
            .filter_map(|key| self.values.get(key).map(|v| (key.clone(), v.clone())))
            .collect()
    }

    fn record_key(&mut self, key: &str, seen: &mut HashSet<String>) {
        if seen.insert(key.to_string()) {
            self.keys.push(key.to_string());
        }
    }
}

impl Lookup for MergedSources {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(Cow::Borrowed)
    }
}

/// Merges `primary` then `fallback` sources, earliest source first.
///
/// An empty input yields an empty result. Errors reported by a source while
/// listing its entries are propagated.
///
/// # Examples
///
/// ```rust
/// use envaware::adapters::MapSource;
/// use envaware::domain::merger::merge;
/// use envaware::ports::ConfigSource;
///
/// let a: Box<dyn ConfigSource> = Box::new(MapSource::new("a").with_value("k", "1"));
/// let b: Box<dyn ConfigSource> = Box::new(MapSource::new("b").with_value("k", "2"));
/// let env: Box<dyn ConfigSource> = Box::new(MapSource::new("env").with_value("PATH", "/bin"));
///
/// let merged = merge(&[a, b], &[env]).unwrap();
/// assert_eq!(merged.get("k"), Some("1"));
/// assert!(merged.is_fallback_only("PATH"));
/// ```
pub fn merge(
    primary: &[Box<dyn ConfigSource>],
    fallback: &[Box<dyn ConfigSource>],
) -> Result<MergedSources> {
    let mut merged = MergedSources::default();
    let mut seen = HashSet::new();

    for source in primary {
        let entries = source.entries()?;
        tracing::debug!(
            "Merging {} entries from primary source '{}'",
            entries.len(),
            source.name()
        );
        for (key, value) in entries {
            let key = key.into_string();
            merged.record_key(&key, &mut seen);
            if let Some(value) = value {
                merged.values.entry(key).or_insert(value);
            }
        }
    }

    let primary_keys = seen.clone();

    for source in fallback {
        let entries = source.entries()?;
        tracing::debug!(
            "Merging {} entries from fallback source '{}'",
            entries.len(),
            source.name()
        );
        for (key, value) in entries {
            let key = key.into_string();
            merged.record_key(&key, &mut seen);
            if !primary_keys.contains(&key) {
                merged.fallback_only.insert(key.clone());
            }
            if let Some(value) = value {
                merged.values.entry(key).or_insert(value);
            }
        }
    }

    Ok(merged)
}
