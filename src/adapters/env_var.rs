// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! This module provides an adapter that snapshots the process environment,
//! either verbatim (as a placeholder fallback) or filtered by a prefix and
//! translated into configuration keys.

use crate::adapters::translator::{translate_all, TranslatorFlavor};
use crate::domain::{ConfigKey, Result};
use crate::ports::{ConfigSource, KeyTranslator};
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source adapter for environment variables.
///
/// The environment is read once, when the adapter is created. Later changes
/// to the process environment are not observed.
///
/// # Examples
///
/// ```rust
/// use envaware::adapters::{EnvVarAdapter, TranslatorFlavor};
///
/// // Every variable, under its own name
/// let all = EnvVarAdapter::new();
///
/// // Only APP_* variables, APP_DB_HOST becoming db.host
/// let app = EnvVarAdapter::prefixed("APP_", TranslatorFlavor::Default).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct EnvVarAdapter {
    /// Snapshot of the (possibly translated) variables
    values: HashMap<String, String>,
}

impl EnvVarAdapter {
    /// Snapshots every environment variable under its own name.
    pub fn new() -> Self {
        let values = Self::load();
        tracing::debug!("Loaded {} environment variables", values.len());
        Self { values }
    }

    /// Snapshots the variables starting with `prefix` and translates their
    /// names into configuration keys with the given flavor.
    ///
    /// Fails with `InvalidArgument` when a matching name cannot be translated
    /// (for example odd-length hex).
    pub fn prefixed(prefix: &str, flavor: TranslatorFlavor) -> Result<Self> {
        Self::prefixed_with(prefix, flavor.translator().as_ref())
    }

    /// Like [`prefixed`](Self::prefixed), with a caller-supplied translator.
    pub fn prefixed_with(prefix: &str, translator: &dyn KeyTranslator) -> Result<Self> {
        let values = translate_all(&Self::load(), prefix, translator)?;
        tracing::debug!(
            "Loaded {} environment variables with prefix {:?}",
            values.len(),
            prefix
        );
        Ok(Self { values })
    }

    /// Creates an adapter with pre-populated values for testing.
    ///
    /// **Note**: This method is primarily intended for testing and should not
    /// be used in production code. Use `new()` or `prefixed()` for normal usage.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Returns the snapshot.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    fn load() -> HashMap<String, String> {
        let mut vars = HashMap::new();

        for (key, value) in env::vars_os() {
            let (Ok(key), Ok(value)) = (key.into_string(), value.into_string()) else {
                tracing::debug!("Skipping environment variable that is not valid UTF-8");
                continue;
            };

            // Validate input sizes to prevent DoS
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            vars.insert(key, value);
        }

        vars
    }
}

impl Default for EnvVarAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}
