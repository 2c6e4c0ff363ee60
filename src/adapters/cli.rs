// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument configuration source adapter.
//!
//! This module provides an adapter that reads property overrides from
//! command-line arguments, plus a `clap` argument group that applications can
//! flatten into their own parser.

use crate::domain::{ConfigKey, Result};
use crate::ports::ConfigSource;
use std::collections::HashMap;

/// Configuration source adapter for command-line arguments.
///
/// Supported argument formats:
/// - `--key=value`: Long form with equals sign
/// - `--key value`: Long form with space-separated value
/// - `-Dkey=value`: Property definition (`-Dkey` alone defines an empty value)
///
/// Anything else is ignored. When a key repeats, the last value wins.
///
/// # Examples
///
/// ```rust
/// use envaware::adapters::CommandLineAdapter;
/// use envaware::domain::ConfigKey;
/// use envaware::ports::ConfigSource;
///
/// let adapter = CommandLineAdapter::from_args(["--database.host=localhost", "--port", "5432", "-Dmode=test"]);
/// assert_eq!(adapter.get(&ConfigKey::from("mode")).unwrap().as_deref(), Some("test"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLineAdapter {
    /// Parsed configuration values
    values: HashMap<String, String>,
}

impl CommandLineAdapter {
    /// Creates a new command-line adapter with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new command-line adapter from a list of arguments.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let mut adapter = Self::new();
        adapter.parse_args(&args);
        tracing::debug!("Parsed {} command-line overrides", adapter.values.len());
        adapter
    }

    /// Creates a new command-line adapter from the process's command-line arguments.
    ///
    /// This skips the first argument (the program name) and parses the rest.
    pub fn from_env_args() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// Returns the parsed values.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_ref();
            i += 1;

            if let Some(long) = arg.strip_prefix("--") {
                // Handle --key=value format
                if let Some((key, value)) = long.split_once('=') {
                    self.insert(key, value);
                    continue;
                }

                // Handle --key value format; a following flag is not a value
                if i < args.len() {
                    let next = args[i].as_ref();
                    if !next.starts_with('-') {
                        self.insert(long, next);
                        i += 1;
                    }
                }
            } else if let Some(define) = arg.strip_prefix("-D") {
                match define.split_once('=') {
                    Some((key, value)) => self.insert(key, value),
                    None => self.insert(define, ""),
                }
            }
        }
    }

    fn insert(&mut self, key: &str, value: &str) {
        if key.is_empty() {
            tracing::debug!("Ignoring command-line override with an empty key");
            return;
        }
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl ConfigSource for CommandLineAdapter {
    fn name(&self) -> &str {
        "cli"
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

/// Property overrides as a `clap` argument group.
///
/// ```rust
/// use clap::Parser;
/// use envaware::adapters::OverrideArgs;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     overrides: OverrideArgs,
/// }
///
/// let cli = Cli::parse_from(["app", "-D", "db.host=localhost", "--define", "db.port=5432"]);
/// assert_eq!(cli.overrides.defines.len(), 2);
/// ```
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OverrideArgs {
    /// Override a configuration property (repeatable)
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    pub defines: Vec<(String, String)>,
}

impl OverrideArgs {
    /// Converts the parsed definitions into a configuration source.
    pub fn into_source(self) -> CommandLineAdapter {
        let mut adapter = CommandLineAdapter::new();
        for (key, value) in &self.defines {
            adapter.insert(key, value);
        }
        adapter
    }
}

fn parse_define(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("missing key in `{}`", s)),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got `{}`", s)),
    }
}
