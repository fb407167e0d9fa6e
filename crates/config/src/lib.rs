//! gtrack configuration management.
//!
//! Reads/writes JSON at `~/.config/gtrack/config.json` and validates that
//! API credentials are no longer the template placeholders before any
//! client performs a network call.

pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{CatalogConfig, Config, StreamingConfig, default_config_path};
