//! In-memory access-token cache.
//!
//! One token per client, cached with an expiry set *earlier* than the
//! provider's real TTL so a token is never used right at its expiry.
//! The slot is a `tokio::sync::Mutex` and the client holds the guard across
//! a refresh, which serializes concurrent refresh attempts into one
//! exchange.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

/// Seconds subtracted from the provider TTL when caching a token.
pub const TOKEN_EXPIRY_MARGIN_SECS: u64 = 300;

/// A cached bearer token and its margin-adjusted deadline.
#[derive(Debug, Clone)]
pub(crate) struct CachedToken {
    pub value: String,
    pub expires_at: Instant,
}

impl CachedToken {
    pub fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Computes the cache deadline for a token with the given provider TTL.
///
/// Saturates at "already expired" when the TTL is shorter than the margin.
pub(crate) fn cache_deadline(expires_in_secs: u64) -> Instant {
    Instant::now() + Duration::from_secs(expires_in_secs.saturating_sub(TOKEN_EXPIRY_MARGIN_SECS))
}

/// Token cache slot. `None` means absent (or invalidated, which is treated
/// identically: the next caller must fetch).
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Locks the slot. Callers refreshing the token keep the guard for the
    /// duration of the exchange.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, Option<CachedToken>> {
        self.slot.lock().await
    }

    /// Drops any cached token.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}
