// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration service implementation.
//!
//! This module contains [`EnvAwareProperties`], the implementation of the
//! `ConfigurationService` trait, and the builder that assembles its sources.

pub mod builder;
pub mod env_aware;

// Re-export commonly used types
pub use builder::EnvAwarePropertiesBuilder;
pub use env_aware::EnvAwareProperties;
