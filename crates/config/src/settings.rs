//! Typed configuration and its on-disk JSON format.
//!
//! A fresh install ships with placeholder credentials; [`Config::validate`]
//! (and the per-section variants) reject those so misconfiguration is
//! reported before any network call is attempted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

/// Placeholder value shipped in the config template for the catalog key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_CATALOG_API_KEY_HERE";
/// Placeholder value shipped in the config template for the client id.
pub const PLACEHOLDER_CLIENT_ID: &str = "YOUR_STREAMING_CLIENT_ID_HERE";
/// Placeholder value shipped in the config template for the client secret.
pub const PLACEHOLDER_CLIENT_SECRET: &str = "YOUR_STREAMING_CLIENT_SECRET_HERE";

/// Games per page in the catalog list endpoint.
const DEFAULT_PAGE_SIZE: u32 = 10;

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Catalog API section: key and page size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    pub api_key: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogConfig {
    /// Rejects an empty or still-placeholder API key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() || self.api_key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::CatalogKeyNotConfigured);
        }
        Ok(())
    }
}

/// Streaming API section: OAuth client-credentials pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            client_id: PLACEHOLDER_CLIENT_ID.into(),
            client_secret: PLACEHOLDER_CLIENT_SECRET.into(),
        }
    }
}

impl StreamingConfig {
    /// Rejects empty or still-placeholder client credentials.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let id_missing =
            self.client_id.trim().is_empty() || self.client_id == PLACEHOLDER_CLIENT_ID;
        let secret_missing =
            self.client_secret.trim().is_empty() || self.client_secret == PLACEHOLDER_CLIENT_SECRET;
        if id_missing || secret_missing {
            return Err(ConfigError::StreamingCredentialsNotConfigured);
        }
        Ok(())
    }
}

/// Full gtrack configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub streaming: StreamingConfig,
    /// Game names (case-insensitive, whitespace-trimmed) hidden from results.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_game_names: Vec<String>,
}

impl Config {
    /// Loads configuration from `path`.
    ///
    /// A missing file yields the placeholder-filled defaults; an unparseable
    /// file is logged and also yields defaults, so a broken config behaves
    /// like a fresh install rather than aborting startup.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Saves the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Validates every section that carries credentials.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        self.streaming.validate()
    }

    /// Whether `name` is on the exclusion list.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn is_excluded(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.excluded_game_names
            .iter()
            .any(|excluded| excluded.trim().to_lowercase() == needle)
    }
}

/// Returns the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("gtrack").join("config.json"))
}

/// Returns the platform-specific config directory.
fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(".config"))
    }
}
