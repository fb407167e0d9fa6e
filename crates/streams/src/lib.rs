//! Streaming API client.
//!
//! Wraps the third-party live-streaming REST API behind OAuth
//! client-credentials auth. The client owns an in-memory access-token cache
//! with an early-expiry margin; refreshes are serialized so concurrent
//! callers share one exchange instead of racing. A 401 on any authenticated
//! call invalidates the cached token before the failure is surfaced — the
//! caller decides whether to re-invoke.

pub mod client;
pub mod error;
pub mod token;
pub mod types;

pub use client::{HttpResponse, StreamingTransport, StreamsClient};
pub use error::StreamsError;
pub use types::{ResolvedGame, StreamSummary, StreamsPage, TokenResponse};
