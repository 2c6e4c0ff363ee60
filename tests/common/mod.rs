// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the integration tests.

use envaware::domain::{ConfigError, ConfigKey, Result};
use envaware::ports::ConfigSource;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sets environment variables and removes them again on drop.
///
/// Tests run in parallel within one process, so every test must use its own
/// variable names.
#[allow(dead_code)]
pub struct EnvGuard {
    keys: Vec<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// A temporary directory holding `.properties` fixtures.
#[allow(dead_code)]
pub struct Fixtures {
    dir: TempDir,
}

#[allow(dead_code)]
impl Fixtures {
    pub fn new() -> Self {
        Fixtures {
            dir: TempDir::new().unwrap(),
        }
    }

    /// The three layered files used by the precedence scenarios.
    pub fn layered() -> Self {
        let fixtures = Self::new();
        fixtures.write("test1.properties", "test1.k1=test1.v1\ntest1.k2=test1.v2\n");
        fixtures.write(
            "test2.properties",
            "test2.k1=test2.v1\ntest2.k2=test2.v2\ntest1.k1=test1.v1.override.test2\n",
        );
        fixtures.write(
            "test3.properties",
            "# overrides for test1 and test2\n\
             test3.k1=test3.v1\n\
             test3.k2=test3.v2\n\
             test1.k1=test1.v1.override.test3\n\
             test1.k2=test1.v2.override.test3\n\
             test2.k1=test2.v1.override.test3\n\
             test2.k2=test2.v2.override.test3\n",
        );
        fixtures
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// A source whose listing fails, for error propagation tests.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FailingSource {
    values: HashMap<String, String>,
}

impl ConfigSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Err(ConfigError::SourceError {
            source_name: "failing".to_string(),
            message: "Mock listing failure".to_string(),
            source: None,
        })
    }
}
