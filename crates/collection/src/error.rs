//! Collection error types.

/// Errors produced by collection storage operations.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no storage path available")]
    NoStoragePath,
}
