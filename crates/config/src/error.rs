//! Configuration error types.

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog API key is missing or still the template placeholder")]
    CatalogKeyNotConfigured,

    #[error("streaming client credentials are missing or still the template placeholder")]
    StreamingCredentialsNotConfigured,
}
