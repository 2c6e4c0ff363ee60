// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! for the components of the configuration system. These traits are implemented
//! by adapters in the adapters layer and consumed by the domain and service layers.

pub mod lookup;
pub mod parser;
pub mod source;
pub mod translator;

// Re-export commonly used types
pub use lookup::{FnLookup, Layered, Lookup};
pub use parser::ConfigParser;
pub use source::ConfigSource;
pub use translator::KeyTranslator;
