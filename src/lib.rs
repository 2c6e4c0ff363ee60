// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered, environment-aware properties configuration.
//!
//! This crate merges configuration from several layered sources (explicit
//! overrides, `.properties` and YAML files, command-line arguments, process
//! properties and environment variables) into one flat key/value mapping, and
//! resolves nested `${key}` placeholders in the values.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: the resolution engine (priority merging, placeholder
//!   resolution, the resolved store and partitioning) and the error type
//! - **Ports**: Trait definitions that define interfaces (`ConfigSource`,
//!   `ConfigParser`, `KeyTranslator`, `Lookup`)
//! - **Adapters**: Implementations for specific configuration sources
//! - **Service**: [`EnvAwareProperties`](service::EnvAwareProperties) and its
//!   builder
//!
//! # Resolution
//!
//! - Earlier sources win: overrides, then explicit sources in the order they
//!   were added, then the fallbacks (dotfiles, process properties,
//!   environment).
//! - Fallback keys are placeholder targets only; they are not entries of the
//!   result unless an explicit source also defines them.
//! - Placeholders nest (`${${selector}}`) and chain (`a=${b}`, `b=${c}`).
//!   Unknown placeholders stay as literal text.
//! - Circular references (`a=${b}`, `b=${a}`) terminate and keep the raw
//!   value.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `env`: Enable environment variable support (default)
//! - `cli`: Enable command-line argument support (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use envaware::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let props = EnvAwareProperties::builder()
//!     .then_add_properties_file("config/application.properties")
//!     .build()?;
//!
//! let db = props.partition("database");
//! println!("url = {}", db.get_or("url", "jdbc://localhost"));
//! println!("home = {:?}", props.get_resolving("${HOME}"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{MapSource, PropertiesFileAdapter, TranslatorFlavor};
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigurationService, PlaceholderResolver, ResolvedStore, Result,
    };
    pub use crate::ports::{ConfigParser, ConfigSource, KeyTranslator};
    pub use crate::service::{EnvAwareProperties, EnvAwarePropertiesBuilder};

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::CommandLineAdapter;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarAdapter;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileAdapter, YamlParser};
}
