// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, the seam between raw file
//! content and the flat key-value maps that sources expose.

use crate::domain::Result;
use std::collections::HashMap;
use std::path::Path;

/// A trait for parsing configuration text into a flat key-value map.
///
/// Parsers for hierarchical formats flatten nested structures using dot
/// notation, so a YAML document like:
///
/// ```yaml
/// database:
///   host: localhost
/// ```
///
/// becomes `database.host -> "localhost"`. Flat formats such as `.properties`
/// are returned as-is.
///
/// # Examples
///
/// ```rust
/// use envaware::ports::ConfigParser;
/// use envaware::domain::Result;
/// use std::collections::HashMap;
///
/// struct PairParser;
///
/// impl ConfigParser for PairParser {
///     fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
///         Ok(content
///             .lines()
///             .filter_map(|l| l.split_once('='))
///             .map(|(k, v)| (k.to_string(), v.to_string()))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["pairs"]
///     }
/// }
///
/// let map = PairParser.parse("a=1\nb=2").unwrap();
/// assert_eq!(map.get("b").map(String::as_str), Some("2"));
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a flat key-value map.
    fn parse(&self, content: &str) -> Result<HashMap<String, String>>;

    /// Returns the file extensions (without the leading dot) this parser
    /// understands.
    fn supported_extensions(&self) -> &[&str];

    /// Returns true when `path` has one of the supported extensions
    /// (compared case-insensitively).
    fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestParser;

    impl ConfigParser for TestParser {
        fn parse(&self, _content: &str) -> Result<HashMap<String, String>> {
            let mut map = HashMap::new();
            map.insert("test.key".to_string(), "test.value".to_string());
            Ok(map)
        }

        fn supported_extensions(&self) -> &[&str] {
            &["test", "tst"]
        }
    }

    #[test]
    fn test_parser_parse() {
        let result = TestParser.parse("dummy content").unwrap();
        assert_eq!(result.get("test.key"), Some(&"test.value".to_string()));
    }

    #[test]
    fn test_supports_path() {
        assert!(TestParser.supports_path(Path::new("/etc/app/config.test")));
        assert!(TestParser.supports_path(Path::new("config.TST")));
        assert!(!TestParser.supports_path(Path::new("config.yaml")));
        assert!(!TestParser.supports_path(Path::new("no_extension")));
    }
}
