// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the resolution engine.
//!
//! Everything in here is pure, in-memory logic: merging sources by precedence,
//! substituting placeholders, and building and partitioning the resolved store.
//! No module in this layer performs I/O.

pub mod chain;
pub mod config_key;
pub mod errors;
pub mod merger;
pub mod placeholder;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use chain::SourceChain;
pub use config_key::ConfigKey;
pub use errors::{ConfigError, Result};
pub use merger::MergedSources;
pub use placeholder::{PlaceholderResolver, Resolution, DEFAULT_MAX_DEPTH};
pub use service::ConfigurationService;
pub use store::ResolvedStore;
