// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process properties configuration source adapter.
//!
//! Process properties describe the running process and its host: user home
//! and working directories, user name, operating system, separators and the
//! process id. They are exposed under dotted names (`user.home`, `os.name`)
//! so that configuration values can reference them as `${user.home}`.

use crate::adapters::translator::{translate_all, TranslatorFlavor};
use crate::domain::{ConfigKey, Result};
use crate::ports::{ConfigSource, KeyTranslator};
use directories::BaseDirs;
use std::collections::HashMap;
use std::env;

/// Configuration source adapter for process properties.
///
/// # Examples
///
/// ```rust
/// use envaware::adapters::ProcessPropertiesAdapter;
/// use envaware::domain::ConfigKey;
/// use envaware::ports::ConfigSource;
///
/// let props = ProcessPropertiesAdapter::new();
/// assert_eq!(
///     props.get(&ConfigKey::from("os.name")).unwrap().as_deref(),
///     Some(std::env::consts::OS)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ProcessPropertiesAdapter {
    values: HashMap<String, String>,
}

impl ProcessPropertiesAdapter {
    /// Snapshots the properties of the current process.
    pub fn new() -> Self {
        let values = Self::snapshot();
        tracing::debug!("Loaded {} process properties", values.len());
        Self { values }
    }

    /// Keeps the properties whose names start with `prefix` and translates
    /// their names with the given flavor.
    pub fn prefixed(prefix: &str, flavor: TranslatorFlavor) -> Result<Self> {
        Self::prefixed_with(prefix, flavor.translator().as_ref())
    }

    /// Like [`prefixed`](Self::prefixed), with a caller-supplied translator.
    pub fn prefixed_with(prefix: &str, translator: &dyn KeyTranslator) -> Result<Self> {
        Ok(Self {
            values: translate_all(&Self::snapshot(), prefix, translator)?,
        })
    }

    /// Creates an adapter with pre-populated values for testing.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Returns the snapshot.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    fn snapshot() -> HashMap<String, String> {
        let mut props = HashMap::new();

        if let Some(base) = BaseDirs::new() {
            props.insert("user.home".to_string(), base.home_dir().display().to_string());
        }
        if let Ok(cwd) = env::current_dir() {
            props.insert("user.dir".to_string(), cwd.display().to_string());
        }
        if let Ok(user) = env::var("USER").or_else(|_| env::var("USERNAME")) {
            props.insert("user.name".to_string(), user);
        }

        props.insert("os.name".to_string(), env::consts::OS.to_string());
        props.insert("os.arch".to_string(), env::consts::ARCH.to_string());
        props.insert("os.family".to_string(), env::consts::FAMILY.to_string());
        props.insert("file.separator".to_string(), std::path::MAIN_SEPARATOR.to_string());
        props.insert("path.separator".to_string(), PATH_SEPARATOR.to_string());
        props.insert("line.separator".to_string(), LINE_SEPARATOR.to_string());
        props.insert("process.id".to_string(), std::process::id().to_string());
        props.insert("tmp.dir".to_string(), env::temp_dir().display().to_string());

        props
    }
}

#[cfg(windows)]
const PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_SEPARATOR: &str = ":";

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

impl Default for ProcessPropertiesAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for ProcessPropertiesAdapter {
    fn name(&self) -> &str {
        "process-properties"
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}
