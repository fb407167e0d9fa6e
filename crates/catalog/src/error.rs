//! Catalog client error types.

/// Errors produced by catalog API operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("configuration error: {0}")]
    Config(#[from] gtrack_config::ConfigError),

    #[error("catalog API error {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
