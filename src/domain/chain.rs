// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resolution chain: ordered primary and fallback sources.

use crate::domain::merger::{merge, MergedSources};
use crate::domain::Result;
use crate::ports::ConfigSource;

/// An ordered list of key-value sources.
///
/// Earlier entries strictly take precedence on key collision. Primary sources
/// (explicit content, files) contribute their keys to the resolved output;
/// fallback sources (dotfiles, process properties, environment) only supply
/// placeholder values.
///
/// # Examples
///
/// ```rust
/// use envaware::adapters::MapSource;
/// use envaware::domain::SourceChain;
///
/// let chain = SourceChain::new()
///     .with_primary(Box::new(MapSource::new("file").with_value("k", "file")))
///     .with_fallback(Box::new(MapSource::new("env").with_value("k", "env")));
///
/// let merged = chain.merge().unwrap();
/// assert_eq!(merged.get("k"), Some("file"));
/// ```
#[derive(Debug, Default)]
pub struct SourceChain {
    primary: Vec<Box<dyn ConfigSource>>,
    fallback: Vec<Box<dyn ConfigSource>>,
}

impl SourceChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a primary source with lower precedence than those already present.
    pub fn push_primary(&mut self, source: Box<dyn ConfigSource>) {
        self.primary.push(source);
    }

    /// Inserts a primary source ahead of all others.
    pub fn prepend_primary(&mut self, source: Box<dyn ConfigSource>) {
        self.primary.insert(0, source);
    }

    /// Appends a fallback source with lower precedence than those already present.
    pub fn push_fallback(&mut self, source: Box<dyn ConfigSource>) {
        self.fallback.push(source);
    }

    /// Chaining form of [`push_primary`](Self::push_primary).
    pub fn with_primary(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.push_primary(source);
        self
    }

    /// Chaining form of [`push_fallback`](Self::push_fallback).
    pub fn with_fallback(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.push_fallback(source);
        self
    }

    /// Returns the primary sources, highest precedence first.
    pub fn primary(&self) -> &[Box<dyn ConfigSource>] {
        &self.primary
    }

    /// Returns the fallback sources, highest precedence first.
    pub fn fallback(&self) -> &[Box<dyn ConfigSource>] {
        &self.fallback
    }

    /// Returns true when the chain holds no source at all.
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.fallback.is_empty()
    }

    /// Merges the chain into one unresolved mapping.
    pub fn merge(&self) -> Result<MergedSources> {
        merge(&self.primary, &self.fallback)
    }
}
