// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resolved store: the final flattened key/value mapping.
//!
//! A store is built once from [`MergedSources`] by resolving every value of
//! every primary key. Fallback-only keys (environment, process properties) are
//! not carried over; they only served as placeholder targets.
//!
//! Entries are indexed by the **original** key text. A key such as `new_${A}`
//! keeps that exact spelling even when `A` resolves; only its value is
//! resolved. Queries by the resolved spelling (`new_some_value`) do not match.

use crate::domain::config_key::normalize_namespace;
use crate::domain::merger::MergedSources;
use crate::domain::placeholder::{PlaceholderResolver, Resolution};
use crate::domain::ConfigKey;
use crate::ports::Lookup;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// A mapping from key to fully resolved value.
///
/// Apart from values caught by circular-reference truncation, no value holds a
/// placeholder that the store itself could still resolve.
///
/// # Examples
///
/// ```rust
/// use envaware::domain::ResolvedStore;
///
/// let store: ResolvedStore = [
///     ("root.ns1.a", "1"),
///     ("root.ns2.b", "2"),
///     ("other", "3"),
/// ]
/// .into_iter()
/// .collect();
///
/// let root = store.partition("root");
/// assert_eq!(root.len(), 2);
/// assert_eq!(root.partition("ns1").get("a"), Some("1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedStore {
    entries: BTreeMap<String, String>,
}

impl ResolvedStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every primary key of `merged` into a new store.
    pub fn from_merged(merged: &MergedSources, resolver: &PlaceholderResolver) -> Self {
        let mut store = Self::new();

        for key in merged.keys() {
            if merged.is_fallback_only(key) {
                continue;
            }

            if ConfigKey::from(key.as_str()).has_placeholder() {
                let resolved_key = resolver.resolve(key, merged);
                tracing::trace!("Key '{}' resolves to '{}', indexed by its original text", key, resolved_key);
            }

            let Some(raw) = merged.get(key) else {
                continue;
            };

            let value = match resolver.resolve_detailed(raw, merged) {
                Resolution::Resolved(value) => value,
                Resolution::Circular(value) => {
                    tracing::warn!(
                        "Possible circular reference while resolving '{}' (max depth {}), keeping its raw value",
                        key,
                        resolver.max_depth()
                    );
                    value
                }
            };
            store.entries.insert(key.clone(), value);
        }

        tracing::debug!(
            "Resolved {} keys ({} fallback-only keys withheld)",
            store.len(),
            merged.fallback_only().len()
        );

        store
    }

    /// Returns the resolved value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns the resolved value of `key`, or `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Returns true if the store holds `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key` as-is, returning the previous value.
    ///
    /// The value is not resolved and other entries are not re-resolved.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Extracts the entries under `prefix` into a new, independent store.
    ///
    /// `prefix` is normalized to end with `.`; matching keys have it stripped
    /// and every other key is dropped.
    pub fn partition(&self, prefix: &str) -> ResolvedStore {
        let prefix = normalize_namespace(prefix);
        let entries = self
            .entries
            .range(prefix.clone()..)
            .map_while(|(key, value)| {
                ConfigKey::from(key.as_str())
                    .strip_namespace(&prefix)
                    .map(|stripped| (stripped.into_string(), value.clone()))
            })
            .collect();

        ResolvedStore { entries }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl Lookup for ResolvedStore {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(Cow::Borrowed)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ResolvedStore {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for ResolvedStore {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<ResolvedStore> for BTreeMap<String, String> {
    fn from(store: ResolvedStore) -> Self {
        store.entries
    }
}

impl fmt::Display for ResolvedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "}}")
    }
}
