//! # FX Adapters
//!
//! Concrete adapters for the conversion service ports:
//! - `memory` - in-process [`RateCache`] with per-key TTL
//! - `redis` - Redis-backed [`RateCache`] (feature `redis`)
//! - `upstream` - ExchangeRate-API implementation of [`RateProvider`](fx_types::RateProvider)

use async_trait::async_trait;
use fx_types::{CacheError, CurrencyCode, RateCache, RateSnapshot};

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;
pub mod upstream;

pub use memory::MemoryCache;
#[cfg(feature = "redis")]
pub use self::redis::RedisCache;
pub use upstream::{ExchangeRateApi, UpstreamConfig};

/// Unified cache wrapper selected from a connection string at startup.
pub enum Cache {
    Memory(MemoryCache),
    #[cfg(feature = "redis")]
    Redis(RedisCache),
}

/// Build a cache from a connection string.
///
/// - `memory://` - in-process cache
/// - `redis://…` / `rediss://…` - Redis (requires the `redis` feature)
///
/// Redis connects lazily, so an unreachable server does not fail startup.
pub fn build_cache(connection_string: &str) -> anyhow::Result<Cache> {
    Cache::new(connection_string)
}

impl Cache {
    pub fn new(connection_string: &str) -> anyhow::Result<Self> {
        if connection_string.starts_with("memory://") {
            return Ok(Cache::Memory(MemoryCache::new()));
        }

        if connection_string.starts_with("redis://") || connection_string.starts_with("rediss://")
        {
            #[cfg(feature = "redis")]
            return Ok(Cache::Redis(RedisCache::new(connection_string)?));

            #[cfg(not(feature = "redis"))]
            anyhow::bail!("Redis cache requires the `redis` feature");
        }

        anyhow::bail!(
            "Unsupported cache connection string: {}",
            connection_string
        )
    }

    /// Short backend name for logs.
    pub fn backend(&self) -> &'static str {
        match self {
            Cache::Memory(_) => "memory",
            #[cfg(feature = "redis")]
            Cache::Redis(_) => "redis",
        }
    }
}

#[async_trait]
impl RateCache for Cache {
    async fn get(&self, base: CurrencyCode) -> Result<Option<RateSnapshot>, CacheError> {
        match self {
            Cache::Memory(inner) => inner.get(base).await,
            #[cfg(feature = "redis")]
            Cache::Redis(inner) => inner.get(base).await,
        }
    }

    async fn put(
        &self,
        base: CurrencyCode,
        snapshot: &RateSnapshot,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        match self {
            Cache::Memory(inner) => inner.put(base, snapshot, ttl_seconds).await,
            #[cfg(feature = "redis")]
            Cache::Redis(inner) => inner.put(base, snapshot, ttl_seconds).await,
        }
    }
}
