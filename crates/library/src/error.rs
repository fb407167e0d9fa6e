//! Aggregation error types.

/// Errors surfaced by the aggregation layer.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("collection error: {0}")]
    Collection(#[from] gtrack_collection::CollectionError),

    #[error("streaming error: {0}")]
    Streams(#[from] gtrack_streams::StreamsError),
}
