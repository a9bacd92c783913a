//! Configuration module for docs-bridge
//!
//! Provides `DocsConfig`, its fluent builder and the file/environment loader.

pub mod builder;
pub mod getters;
pub mod loader;
pub mod types;

pub use builder::DocsConfigBuilder;
pub use types::{DocsConfig, SeedPage};
