// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype.
//!
//! Keys are plain strings, but they carry two pieces of structure the rest of
//! the crate relies on: dotted namespaces (used by partitioning) and embedded
//! `${...}` placeholders (used by indirect lookups).

use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between namespace segments of a key.
pub const NAMESPACE_SEPARATOR: char = '.';

/// A type-safe wrapper for configuration keys.
///
/// # Examples
///
/// ```
/// use envaware::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("database.host");
/// assert_eq!(key.as_str(), "database.host");
/// assert_eq!(key.strip_namespace("database").unwrap().as_str(), "host");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns true when the key text contains a `${` opener, i.e. it may
    /// need resolving before it names a real entry.
    pub fn has_placeholder(&self) -> bool {
        self.0.contains("${")
    }

    /// Strips `namespace` from the front of this key.
    ///
    /// The namespace is normalized to end with [`NAMESPACE_SEPARATOR`] first,
    /// so `"root"` and `"root."` behave the same. Returns `None` when the key
    /// does not live under the namespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use envaware::domain::config_key::ConfigKey;
    ///
    /// let key = ConfigKey::from("root.ns1.a");
    /// assert_eq!(key.strip_namespace("root.").unwrap().as_str(), "ns1.a");
    /// assert!(key.strip_namespace("other").is_none());
    /// ```
    pub fn strip_namespace(&self, namespace: &str) -> Option<ConfigKey> {
        let prefix = normalize_namespace(namespace);
        self.0
            .strip_prefix(prefix.as_str())
            .map(|rest| ConfigKey(rest.to_string()))
    }
}

/// Appends the namespace separator to `namespace` unless it already ends
/// with one.
pub fn normalize_namespace(namespace: &str) -> String {
    if namespace.ends_with(NAMESPACE_SEPARATOR) {
        namespace.to_string()
    } else {
        format!("{}{}", namespace, NAMESPACE_SEPARATOR)
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for ConfigKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
