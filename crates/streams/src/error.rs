//! Streaming client error types.

/// Errors produced by streaming API operations.
#[derive(Debug, thiserror::Error)]
pub enum StreamsError {
    #[error("configuration error: {0}")]
    Config(#[from] gtrack_config::ConfigError),

    #[error("streaming API error {status}: {detail}")]
    Api { status: u16, detail: String },

    /// The provider rejected the bearer token. The cached token has already
    /// been invalidated when this is returned.
    #[error("unauthorized: {detail}")]
    Unauthorized { detail: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
