// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the envaware crate.
//!
//! Resolution itself never fails for data reasons: circular references and
//! missing placeholder targets degrade gracefully. The errors defined here
//! cover structurally invalid input and failures of the collaborators that
//! produce key-value sources.

use thiserror::Error;

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use envaware::domain::errors::ConfigError;
///
/// fn check_prefix(prefix: &str) -> Result<(), ConfigError> {
///     if prefix.is_empty() {
///         return Err(ConfigError::InvalidArgument {
///             message: "prefix must not be empty".to_string(),
///         });
///     }
///     Ok(())
/// }
///
/// assert!(check_prefix("").is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Structurally invalid input, such as an odd-length hex key or an
    /// empty source list where at least one source is required.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument
        message: String,
    },

    /// An error occurred in a configuration source.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse configuration text.
    #[error("Failed to parse configuration{}: {message}", line_suffix(.line))]
    ParseError {
        /// The error message
        message: String,
        /// The 1-based line the problem was found on, when known
        line: Option<usize>,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates an `InvalidArgument` error from any message.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ConfigError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Wraps a collaborator failure as a `SourceError` for the named source.
    pub fn source_failure<E>(source_name: impl Into<String>, message: impl Into<String>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ConfigError::SourceError {
            source_name: source_name.into(),
            message: message.into(),
            source: Some(Box::new(err)),
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
