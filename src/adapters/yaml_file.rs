// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration source adapter.
//!
//! A YAML document is read as a tree of properties: every scalar leaf becomes
//! one `key=value` entry whose key is the dotted path to it. The result merges
//! with `.properties` sources key for key, and `${...}` placeholders in YAML
//! strings are resolved like any other value.

use crate::adapters::properties_file::{read_bounded, read_file_bounded};
use crate::domain::{ConfigError, ConfigKey, Result};
use crate::ports::{ConfigParser, ConfigSource};
use serde_yaml::Value;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parser turning a YAML document into flat properties.
///
/// - Nested mappings join their keys with `.` (`db: {host: x}` is `db.host`).
/// - Sequence items are keyed by index (`hosts.0`, `hosts.1`).
/// - Keys that are numbers or booleans are used in their text form.
/// - Scalars keep their text form; `null` and empty collections are empty
///   strings, so the key still exists.
/// - Tags are ignored and the tagged value is read as if untagged.
/// - The document must be a mapping (or empty). When two paths flatten to
///   the same key the later one wins, as for repeated `.properties` keys.
///
/// # Examples
///
/// ```rust
/// use envaware::adapters::YamlParser;
/// use envaware::ports::ConfigParser;
///
/// let parsed = YamlParser::new()
///     .parse("db:\n  host: localhost\n  url: jdbc://${db.host}\nports: [80, 443]")
///     .unwrap();
/// assert_eq!(parsed["db.url"], "jdbc://${db.host}");
/// assert_eq!(parsed["ports.1"], "443");
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn flatten(root: Value) -> Result<HashMap<String, String>> {
        let mut entries = HashMap::new();
        let mut pending: Vec<(String, Value)> = match untag(root) {
            Value::Null => return Ok(entries),
            Value::Mapping(map) => {
                let mut top = map
                    .into_iter()
                    .map(|(k, v)| Ok((key_text(&k)?, v)))
                    .collect::<Result<Vec<_>>>()?;
                top.reverse();
                top
            }
            other => {
                return Err(ConfigError::ParseError {
                    message: format!(
                        "YAML document must be a mapping of properties, found {}",
                        kind(&other)
                    ),
                    line: None,
                    source: None,
                })
            }
        };

        // Depth-first, in document order
        while let Some((path, value)) = pending.pop() {
            match untag(value) {
                Value::Mapping(map) if map.is_empty() => {
                    entries.insert(path, String::new());
                }
                Value::Sequence(seq) if seq.is_empty() => {
                    entries.insert(path, String::new());
                }
                Value::Mapping(map) => {
                    let children = map
                        .into_iter()
                        .map(|(k, v)| Ok((format!("{}.{}", path, key_text(&k)?), v)))
                        .collect::<Result<Vec<_>>>()?;
                    pending.extend(children.into_iter().rev());
                }
                Value::Sequence(seq) => {
                    pending.extend(
                        seq.into_iter()
                            .enumerate()
                            .rev()
                            .map(|(i, v)| (format!("{}.{}", path, i), v)),
                    );
                }
                scalar => {
                    entries.insert(path, scalar_text(&scalar).unwrap_or_default());
                }
            }
        }

        Ok(entries)
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        let root: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Invalid YAML: {}", e),
            line: e.location().map(|loc| loc.line()),
            source: Some(Box::new(e)),
        })?;

        Self::flatten(root)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn key_text(key: &Value) -> Result<String> {
    match scalar_text(key) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ConfigError::ParseError {
            message: format!("YAML key must be a non-empty scalar, found {}", kind(key)),
            line: None,
            source: None,
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Configuration source backed by a YAML document.
///
/// # Examples
///
/// ```rust
/// use envaware::prelude::*;
///
/// # fn main() -> Result<()> {
/// let yaml = YamlFileAdapter::from_content("inline", "server:\n  host: example.org\n  url: https://${server.host}")?;
/// let props = EnvAwareProperties::builder()
///     .isolated()
///     .then_add_source(Box::new(yaml))
///     .build()?;
///
/// assert_eq!(props.get("server.url"), Some("https://example.org"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileAdapter {
    name: String,
    file_path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl YamlFileAdapter {
    /// Reads and flattens a YAML file.
    ///
    /// Failures to open or read the file are reported as `SourceError`;
    /// malformed content as `ParseError`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let content = read_file_bounded("yaml-file", &file_path)?;

        let values = YamlParser::new().parse(&content)?;
        tracing::debug!("Loaded {} properties from YAML {}", values.len(), file_path.display());

        Ok(Self {
            name: "yaml-file".to_string(),
            file_path: Some(file_path),
            values,
        })
    }

    /// Reads a YAML document from any reader.
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let name = name.into();
        let content = read_bounded(&name, reader)?;
        Self::from_content(name, &content)
    }

    /// Flattens a YAML document held in memory.
    pub fn from_content(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            file_path: None,
            values: YamlParser::new().parse(content)?,
        })
    }

    /// Returns the path the values were read from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the flattened values.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }
}

impl ConfigSource for YamlFileAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}
