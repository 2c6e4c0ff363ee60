// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value source trait definition.
//!
//! This module defines the `ConfigSource` trait, the port through which every
//! input (explicit overrides, `.properties` files, YAML files, environment
//! variables, process properties, command-line arguments) reaches the merger.

use crate::domain::{ConfigKey, Result};

/// An immutable mapping from string key to string value.
///
/// Sources do not carry a priority of their own: precedence is decided by the
/// position of a source inside a [`SourceChain`](crate::domain::SourceChain),
/// where earlier entries win. A source is constructed once and never mutated
/// by the resolver.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Examples
///
/// ```rust
/// use envaware::ports::ConfigSource;
/// use envaware::domain::{ConfigKey, Result};
///
/// struct Fixed;
///
/// impl ConfigSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
///         Ok((key.as_str() == "answer").then(|| "42".to_string()))
///     }
///
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> {
///         Ok(vec![ConfigKey::from("answer")])
///     }
/// }
///
/// let entries = Fixed.entries().unwrap();
/// assert_eq!(entries, vec![(ConfigKey::from("answer"), Some("42".to_string()))]);
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this source.
    ///
    /// This name is used for logging and error messages. It should be a short
    /// identifier like "env", "overrides", "properties-file".
    fn name(&self) -> &str;

    /// Retrieves the value bound to `key`.
    ///
    /// Returns `Ok(None)` when the key is unknown to this source, or when the
    /// key is known but carries no value.
    fn get(&self, key: &ConfigKey) -> Result<Option<String>>;

    /// Returns every key this source defines. Keys are unique within a source.
    fn all_keys(&self) -> Result<Vec<ConfigKey>>;

    /// Returns every key together with its (possibly absent) value.
    ///
    /// The default implementation combines [`all_keys`](Self::all_keys) and
    /// [`get`](Self::get); sources backed by a map may override it.
    fn entries(&self) -> Result<Vec<(ConfigKey, Option<String>)>> {
        self.all_keys()?
            .into_iter()
            .map(|key| {
                let value = self.get(&key)?;
                Ok((key, value))
            })
            .collect()
    }
}

impl std::fmt::Debug for dyn ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSource")
            .field("name", &self.name())
            .finish()
    }
}
