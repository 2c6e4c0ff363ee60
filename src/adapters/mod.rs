// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration source implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer: sources for in-memory maps, `.properties` and YAML files,
//! environment variables, process properties and command-line arguments, and
//! the built-in environment-name translators.

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "env")]
pub mod env_var;
pub mod map;
pub mod process_props;
pub mod properties_file;
pub mod translator;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::{CommandLineAdapter, OverrideArgs};
#[cfg(feature = "env")]
pub use env_var::EnvVarAdapter;
pub use map::MapSource;
pub use process_props::ProcessPropertiesAdapter;
pub use properties_file::{PropertiesFileAdapter, PropertiesParser, DOTFILE_NAME};
pub use translator::{translate_all, DefaultTranslator, HexTranslator, TranslatorFlavor};
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileAdapter, YamlParser};
