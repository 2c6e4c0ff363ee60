// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration service trait definition.
//!
//! This module defines the `ConfigurationService` trait, the query surface of a
//! resolved configuration: plain lookups, resolving lookups and partitioning.

/// The query surface of a resolved configuration.
///
/// # Examples
///
/// ```rust
/// use envaware::prelude::*;
///
/// # fn main() -> Result<()> {
/// let props = EnvAwareProperties::builder()
///     .isolated()
///     .with_override("db.host", "localhost")
///     .with_override("db.url", "jdbc://${db.host}/app")
///     .build()?;
///
/// assert_eq!(props.get("db.url"), Some("jdbc://localhost/app"));
/// assert_eq!(props.partition("db").get("host"), Some("localhost"));
/// # Ok(())
/// # }
/// ```
pub trait ConfigurationService {
    /// Returns the stored resolved value of `key`.
    ///
    /// No resolution happens at query time; values were resolved when the
    /// configuration was built.
    fn get(&self, key: &str) -> Option<&str>;

    /// Returns the stored resolved value of `key`, or `default` when absent.
    fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Resolves the query key itself, looks up the value of the resolved key,
    /// and resolves that value once more.
    ///
    /// This supports indirect lookups such as "the value of the key named by
    /// environment variable X" (`"${X}"`).
    fn get_resolving(&self, key: &str) -> Option<String>;

    /// Like [`get_resolving`](Self::get_resolving), with a default for absent values.
    fn get_resolving_or(&self, key: &str, default: &str) -> String {
        self.get_resolving(key).unwrap_or_else(|| default.to_string())
    }

    /// Returns true if `key` has a stored value.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Extracts the entries under `prefix` (normalized to end with `.`), with
    /// the prefix stripped, into a new independent configuration.
    fn partition(&self, prefix: &str) -> Self
    where
        Self: Sized;
}
