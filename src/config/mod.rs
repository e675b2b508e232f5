//! Configuration module for the icon generator
//!
//! Provides types and parsing for `monoglyph.toml`.

pub mod loader;
pub mod schema;

pub use loader::{load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
