// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-name to configuration-key translation.
//!
//! Environment variables and process properties are usually named in a flat,
//! upper-case, underscore-separated style (`APP_DATABASE_URL`). A
//! `KeyTranslator` maps such a name, together with a required prefix, onto the
//! dotted key the rest of the configuration uses (`database.url`).

use crate::domain::Result;

/// Translates an environment or process-property name into a configuration key.
///
/// # Examples
///
/// ```rust
/// use envaware::ports::KeyTranslator;
/// use envaware::domain::Result;
///
/// struct Verbatim;
///
/// impl KeyTranslator for Verbatim {
///     fn translate(&self, key: &str, prefix: &str) -> Result<Option<String>> {
///         Ok(key.strip_prefix(prefix).map(str::to_string))
///     }
/// }
///
/// assert_eq!(Verbatim.translate("APP_X", "APP_").unwrap().as_deref(), Some("X"));
/// assert_eq!(Verbatim.translate("OTHER", "APP_").unwrap(), None);
/// ```
pub trait KeyTranslator: Send + Sync {
    /// Returns the configuration key `key` maps to.
    ///
    /// * `Ok(None)` - `key` does not start with `prefix`
    /// * `Err(ConfigError::InvalidArgument)` - the remainder is malformed for
    ///   this translation policy
    fn translate(&self, key: &str, prefix: &str) -> Result<Option<String>>;
}
