//! Rate cache port.
//!
//! A key-value store of rate snapshots keyed by base currency. Expiry is
//! delegated to the store's own per-key TTL; there is no explicit delete.

use crate::{CurrencyCode, RateSnapshot};

/// Lifetime of a cached snapshot unless the caller asks otherwise.
pub const DEFAULT_TTL_SECONDS: u64 = 3600;

/// Store key for the snapshot of `base`.
pub fn cache_key(base: CurrencyCode) -> String {
    format!("cache:currency:{}", base)
}

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt cache entry: {0}")]
    Corrupt(String),

    #[error("TTL must be at least one second")]
    InvalidTtl,
}

/// Port trait for rate snapshot caches.
///
/// Implementations must tolerate concurrent `get`/`put` from independent
/// callers. A `put` replaces any prior entry for the same base currency.
#[async_trait::async_trait]
pub trait RateCache: Send + Sync + 'static {
    /// Returns the snapshot for `base`, or `None` on a miss or expired entry.
    async fn get(&self, base: CurrencyCode) -> Result<Option<RateSnapshot>, CacheError>;

    /// Stores `snapshot` under `base`, expiring `ttl_seconds` from now.
    async fn put(
        &self,
        base: CurrencyCode,
        snapshot: &RateSnapshot,
        ttl_seconds: u64,
    ) -> Result<(), CacheError>;
}
