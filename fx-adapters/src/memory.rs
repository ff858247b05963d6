//! In-process rate cache.
//!
//! Entries carry their own deadline; expired entries are treated as absent
//! and evicted lazily on the next read of the same key.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::{Duration, Instant};

use fx_types::{CacheError, CurrencyCode, RateCache, RateSnapshot};

#[derive(Debug, Clone)]
struct Entry {
    snapshot: RateSnapshot,
    expires_at: Instant,
}

/// Concurrent in-memory [`RateCache`] keyed by base currency.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<CurrencyCode, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl RateCache for MemoryCache {
    async fn get(&self, base: CurrencyCode) -> Result<Option<RateSnapshot>, CacheError> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(&base) {
            if entry.expires_at > now {
                return Ok(Some(entry.snapshot.clone()));
            }
        }

        // The read guard must be released before touching the shard again.
        self.entries.remove_if(&base, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn put(
        &self,
        base: CurrencyCode,
        snapshot: &RateSnapshot,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        if ttl_seconds == 0 {
            return Err(CacheError::InvalidTtl);
        }

        self.entries.insert(
            base,
            Entry {
                snapshot: snapshot.clone(),
                expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
            },
        );
        Ok(())
    }
}
