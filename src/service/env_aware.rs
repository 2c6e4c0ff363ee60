// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resolved, environment-aware configuration.
//!
//! [`EnvAwareProperties`] is what a builder produces: a [`ResolvedStore`] of
//! the explicit sources' keys plus the fallback-only values (environment,
//! process properties, dotfiles) kept aside for resolving lookups.

use crate::domain::{
    ConfigError, ConfigurationService, PlaceholderResolver, ResolvedStore, Result, SourceChain,
};
use crate::ports::{ConfigSource, Layered, Lookup};
use crate::service::EnvAwarePropertiesBuilder;
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Default locations searched by [`EnvAwareProperties::default_properties`].
const DEFAULT_LOCATIONS: [&str; 2] = ["./config/application.properties", "./application.properties"];

/// A resolved configuration.
///
/// Values are resolved once, when the configuration is built. Plain lookups
/// ([`get`](ConfigurationService::get)) return stored values;
/// [`get_resolving`](ConfigurationService::get_resolving) also resolves the
/// query key and can reach fallback-only values such as environment
/// variables.
///
/// # Examples
///
/// ```rust
/// use envaware::prelude::*;
///
/// # fn main() -> Result<()> {
/// let props = EnvAwareProperties::builder()
///     .isolated()
///     .then_add_map([
///         ("key.33", "app.class.path"),
///         ("key.44", "${${key.33}}"),
///         ("app.class.path", "/usr/lib/app.jar"),
///         ("selector", "key.33"),
///     ])
///     .build()?;
///
/// assert_eq!(props.get("key.44"), Some("/usr/lib/app.jar"));
/// assert_eq!(props.get_resolving("${selector}").as_deref(), Some("app.class.path"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EnvAwareProperties {
    store: ResolvedStore,
    fallback: Arc<HashMap<String, String>>,
    resolver: PlaceholderResolver,
}

impl EnvAwareProperties {
    /// Creates a builder with every fallback enabled.
    pub fn builder() -> EnvAwarePropertiesBuilder {
        EnvAwarePropertiesBuilder::new()
    }

    /// Merges and resolves a source chain.
    pub fn from_chain(chain: &SourceChain, resolver: PlaceholderResolver) -> Result<Self> {
        let merged = chain.merge()?;
        let store = ResolvedStore::from_merged(&merged, &resolver);

        Ok(Self {
            store,
            fallback: Arc::new(merged.fallback_values()),
            resolver,
        })
    }

    /// Builds from the given sources, earlier sources taking precedence, with
    /// the default fallbacks.
    ///
    /// Fails with `InvalidArgument` if `sources` is empty.
    pub fn from_sources(sources: Vec<Box<dyn ConfigSource>>) -> Result<Self> {
        if sources.is_empty() {
            return Err(ConfigError::invalid_argument("At least one source is required"));
        }

        sources
            .into_iter()
            .fold(Self::builder(), |builder, source| builder.then_add_source(source))
            .build()
    }

    /// Builds from files, earlier files taking precedence, with the default
    /// fallbacks. The format of each file is chosen by its extension.
    ///
    /// Paths that do not exist are skipped with a warning. Fails with
    /// `InvalidArgument` if no path is given or none exists.
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut builder = Self::builder();
        let mut given = 0;
        let mut loaded = 0;

        for path in paths {
            given += 1;
            let path = path.as_ref();
            if !path.exists() {
                tracing::warn!("Skipping missing configuration file {}", path.display());
                continue;
            }
            loaded += 1;
            builder = builder.then_add_file(path);
        }

        if given == 0 {
            return Err(ConfigError::invalid_argument("At least one path is required"));
        }
        if loaded == 0 {
            return Err(ConfigError::invalid_argument(format!(
                "None of the {} given configuration files exists",
                given
            )));
        }

        builder.build()
    }

    /// Builds from `.properties` readers, earlier readers taking precedence,
    /// with the default fallbacks.
    ///
    /// Fails with `InvalidArgument` if no reader is given.
    pub fn from_readers<I, R>(readers: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Read,
    {
        let mut builder = Self::builder();
        let mut count = 0;

        for reader in readers {
            builder = builder.then_add_reader(format!("reader-{}", count), reader);
            count += 1;
        }

        if count == 0 {
            return Err(ConfigError::invalid_argument("At least one reader is required"));
        }

        builder.build()
    }

    /// Loads `./config/application.properties`, or else
    /// `./application.properties`, with the default fallbacks.
    ///
    /// Fails with `InvalidArgument` naming the current directory if neither
    /// can be loaded.
    pub fn default_properties() -> Result<Self> {
        for location in DEFAULT_LOCATIONS {
            match Self::builder().then_add_properties_file(location).build() {
                Ok(props) => {
                    tracing::debug!("Loaded default properties from {}", location);
                    return Ok(props);
                }
                Err(e) => tracing::debug!("Cannot load {}: {}", location, e),
            }
        }

        let cwd = std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());
        Err(ConfigError::invalid_argument(format!(
            "None of {} and {} exists (cwd = {})",
            DEFAULT_LOCATIONS[0], DEFAULT_LOCATIONS[1], cwd
        )))
    }

    /// Stores `value` under `key` as-is. Other entries are not re-resolved.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.store.set(key, value)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.store.remove(key)
    }

    /// Returns the resolved store.
    pub fn store(&self) -> &ResolvedStore {
        &self.store
    }

    /// Consumes the configuration, returning its resolved store.
    pub fn into_store(self) -> ResolvedStore {
        self.store
    }

    /// Returns the resolver used for resolving lookups.
    pub fn resolver(&self) -> PlaceholderResolver {
        self.resolver
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.store.iter()
    }

    fn layered(&self) -> Layered<'_> {
        Layered::new().layer(&self.store).layer(&*self.fallback)
    }
}

impl ConfigurationService for EnvAwareProperties {
    fn get(&self, key: &str) -> Option<&str> {
        self.store.get(key)
    }

    fn get_resolving(&self, key: &str) -> Option<String> {
        let lookup = self.layered();
        let resolved_key = self.resolver.resolve(key, &lookup);
        let raw = lookup.lookup(&resolved_key)?.into_owned();
        Some(self.resolver.resolve(&raw, &lookup))
    }

    fn partition(&self, prefix: &str) -> Self {
        Self {
            store: self.store.partition(prefix),
            fallback: Arc::clone(&self.fallback),
            resolver: self.resolver,
        }
    }
}

impl fmt::Display for EnvAwareProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.store, f)
    }
}
