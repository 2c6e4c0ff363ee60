// SPDX-License-Identifier: MIT OR Apache-2.0

//! `.properties` configuration source adapter.
//!
//! This module provides a parser for the line-oriented `key=value` properties
//! format and an adapter that exposes a parsed file, reader or string as a
//! configuration source.

use crate::domain::{ConfigError, ConfigKey, Result};
use crate::ports::{ConfigParser, ConfigSource};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Maximum size of a configuration file or reader input (10MB)
pub(crate) const MAX_CONFIG_INPUT_SIZE: u64 = 10 * 1024 * 1024;

/// File name of the optional per-directory properties dotfile.
pub const DOTFILE_NAME: &str = ".jproperties";

/// Parser for the `.properties` text format.
///
/// - Blank lines and lines starting with `#` or `!` are ignored.
/// - A line ending in an odd number of backslashes continues on the next line;
///   leading whitespace of the continuation is dropped.
/// - The key ends at the first unescaped `=`, `:` or whitespace. Whitespace
///   around the separator is skipped.
/// - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded; any other escaped
///   character stands for itself.
/// - When a key repeats, the last occurrence wins.
///
/// # Examples
///
/// ```rust
/// use envaware::adapters::PropertiesParser;
/// use envaware::ports::ConfigParser;
///
/// let parsed = PropertiesParser::new()
///     .parse("# comment\ndb.url = jdbc:${db.host}\\\n    /app\nname:envaware")
///     .unwrap();
/// assert_eq!(parsed.get("db.url").map(String::as_str), Some("jdbc:${db.host}/app"));
/// assert_eq!(parsed.get("name").map(String::as_str), Some("envaware"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertiesParser;

impl PropertiesParser {
    /// Creates a new properties parser.
    pub fn new() -> Self {
        PropertiesParser
    }

    /// Joins natural lines into logical lines, dropping comments and blanks.
    /// Each logical line carries the 1-based number of its first natural line.
    fn logical_lines(content: &str) -> Vec<(usize, String)> {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        let mut lines = normalized.split('\n').enumerate();
        let mut logical_lines = Vec::new();

        while let Some((index, line)) = lines.next() {
            let trimmed = line.trim_start_matches(is_blank);
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = String::new();
            let mut current = trimmed;
            loop {
                if ends_with_odd_backslashes(current) {
                    logical.push_str(&current[..current.len() - 1]);
                    match lines.next() {
                        Some((_, next)) => current = next.trim_start_matches(is_blank),
                        None => break,
                    }
                } else {
                    logical.push_str(current);
                    break;
                }
            }
            logical_lines.push((index + 1, logical));
        }

        logical_lines
    }

    /// Splits one logical line into its unescaped key and value.
    fn parse_entry(line_no: usize, logical: &str) -> Result<(String, String)> {
        let chars: Vec<char> = logical.chars().collect();
        let limit = chars.len();
        let mut key_len = 0;
        let mut value_start = limit;
        let mut has_separator = false;
        let mut preceding_backslash = false;

        while key_len < limit {
            let c = chars[key_len];
            if (c == '=' || c == ':') && !preceding_backslash {
                value_start = key_len + 1;
                has_separator = true;
                break;
            } else if is_blank(c) && !preceding_backslash {
                value_start = key_len + 1;
                break;
            }
            preceding_backslash = c == '\\' && !preceding_backslash;
            key_len += 1;
        }

        while value_start < limit {
            let c = chars[value_start];
            if !is_blank(c) {
                if !has_separator && (c == '=' || c == ':') {
                    has_separator = true;
                } else {
                    break;
                }
            }
            value_start += 1;
        }

        let key = unescape(&chars[..key_len], line_no)?;
        let value = unescape(&chars[value_start.min(limit)..], line_no)?;
        Ok((key, value))
    }
}

impl ConfigParser for PropertiesParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        let mut result = HashMap::new();
        for (line_no, logical) in Self::logical_lines(content) {
            let (key, value) = Self::parse_entry(line_no, &logical)?;
            result.insert(key, value);
        }
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["properties", "jproperties"]
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\u{000C}'
}

fn ends_with_odd_backslashes(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn unescape(chars: &[char], line_no: usize) -> Result<String> {
    let mut out = String::with_capacity(chars.len());
    let mut iter = chars.iter().copied();
    let mut high_surrogate: Option<u16> = None;

    while let Some(c) = iter.next() {
        let decoded = if c == '\\' {
            match iter.next() {
                Some('u') => {
                    let hex: String = iter.by_ref().take(4).collect();
                    if hex.chars().count() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                        return Err(ConfigError::ParseError {
                            message: format!("Malformed \\uxxxx encoding: \\u{}", hex),
                            line: Some(line_no),
                            source: None,
                        });
                    }
                    let unit = u16::from_str_radix(&hex, 16).map_err(|e| ConfigError::ParseError {
                        message: format!("Malformed \\uxxxx encoding: \\u{}", hex),
                        line: Some(line_no),
                        source: Some(Box::new(e)),
                    })?;

                    match unit {
                        0xD800..=0xDBFF => {
                            if high_surrogate.replace(unit).is_some() {
                                out.push(char::REPLACEMENT_CHARACTER);
                            }
                            continue;
                        }
                        0xDC00..=0xDFFF => {
                            let pair = match high_surrogate.take() {
                                Some(high) => char::decode_utf16([high, unit])
                                    .next()
                                    .and_then(|r| r.ok())
                                    .unwrap_or(char::REPLACEMENT_CHARACTER),
                                None => char::REPLACEMENT_CHARACTER,
                            };
                            out.push(pair);
                            continue;
                        }
                        _ => char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER),
                    }
                }
                Some('t') => '\t',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('f') => '\u{000C}',
                Some(other) => other,
                None => break,
            }
        } else {
            c
        };

        if high_surrogate.take().is_some() {
            out.push(char::REPLACEMENT_CHARACTER);
        }
        out.push(decoded);
    }

    if high_surrogate.is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }

    Ok(out)
}

/// Configuration source adapter for `.properties` content.
///
/// # Examples
///
/// ```rust,no_run
/// use envaware::adapters::PropertiesFileAdapter;
///
/// let adapter = PropertiesFileAdapter::from_file("config/application.properties").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PropertiesFileAdapter {
    /// Source name used in logs and errors
    name: String,
    /// Path the values were read from, if any
    file_path: Option<PathBuf>,
    /// Parsed configuration values
    values: HashMap<String, String>,
}

impl PropertiesFileAdapter {
    /// Reads and parses a properties file.
    ///
    /// Failures to open or read the file are reported as `SourceError`;
    /// malformed content as `ParseError`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let content = read_file_bounded("properties-file", &file_path)?;

        let values = PropertiesParser::new().parse(&content)?;
        tracing::debug!("Loaded {} properties from {}", values.len(), file_path.display());

        Ok(Self {
            name: "properties-file".to_string(),
            file_path: Some(file_path),
            values,
        })
    }

    /// Reads a properties file if it exists and is non-empty.
    ///
    /// Missing, empty, unreadable or malformed files yield `None`; the reason
    /// is logged.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => {}
            _ => {
                tracing::debug!("Skipping optional properties file {}", path.display());
                return None;
            }
        }

        match Self::from_file(path) {
            Ok(adapter) => Some(adapter),
            Err(e) => {
                tracing::warn!("Ignoring optional properties file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Reads properties from any reader.
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let name = name.into();
        let content = read_bounded(&name, reader)?;
        Self::from_content(name, &content)
    }

    /// Parses properties from an in-memory string.
    pub fn from_content(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            file_path: None,
            values: PropertiesParser::new().parse(content)?,
        })
    }

    /// Returns the path the values were read from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the parsed values.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }
}

/// Reads a configuration file of at most 10MB into a string.
///
/// Open, read and size failures are reported as `SourceError` under
/// `source_name`.
pub(crate) fn read_file_bounded(source_name: &str, path: &Path) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| {
        ConfigError::source_failure(
            source_name,
            format!("Invalid or inaccessible path: {}", path.display()),
            e,
        )
    })?;

    if metadata.len() > MAX_CONFIG_INPUT_SIZE {
        return Err(ConfigError::SourceError {
            source_name: source_name.to_string(),
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_CONFIG_INPUT_SIZE
            ),
            source: None,
        });
    }

    fs::read_to_string(path).map_err(|e| {
        ConfigError::source_failure(
            source_name,
            format!("Failed to read configuration file: {}", path.display()),
            e,
        )
    })
}

/// Drains a reader of at most 10MB into a string.
pub(crate) fn read_bounded<R: Read>(source_name: &str, mut reader: R) -> Result<String> {
    let mut content = String::new();
    reader
        .by_ref()
        .take(MAX_CONFIG_INPUT_SIZE + 1)
        .read_to_string(&mut content)
        .map_err(|e| ConfigError::source_failure(source_name, "Failed to read configuration input", e))?;

    if content.len() as u64 > MAX_CONFIG_INPUT_SIZE {
        return Err(ConfigError::SourceError {
            source_name: source_name.to_string(),
            message: format!("Configuration input too large (max {} bytes)", MAX_CONFIG_INPUT_SIZE),
            source: None,
        });
    }

    Ok(content)
}

impl ConfigSource for PropertiesFileAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &ConfigKey) -> Result<Option<String>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self
            .values
            .keys()
            .map(|k| ConfigKey::from(k.as_str()))
            .collect())
    }
}
