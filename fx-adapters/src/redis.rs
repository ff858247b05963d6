//! Redis-backed rate cache.
//!
//! Each base currency lives under `cache:currency:<BASE>` as the JSON-encoded
//! snapshot, written with `SETEX` so Redis owns expiry. The connection is
//! established on first use and every operation is bounded by a timeout, so
//! an unreachable server surfaces quickly as [`CacheError::Unavailable`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use serde::Deserialize;
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::debug;

use fx_types::{CacheError, CurrencyCode, RateCache, RateSnapshot, cache_key};

/// Upper bound for connecting and for each command.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(2);

pub struct RedisCache {
    client: redis::Client,
    connection: OnceCell<ConnectionManager>,
    op_timeout: Duration,
}

impl RedisCache {
    /// Creates a cache for `url` without connecting.
    pub fn new(url: &str) -> anyhow::Result<Self> {
        Self::with_timeout(url, DEFAULT_OP_TIMEOUT)
    }

    pub fn with_timeout(url: &str, op_timeout: Duration) -> anyhow::Result<Self> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            connection: OnceCell::new(),
            op_timeout,
        })
    }

    /// A single connect attempt: with Redis down every request retries the
    /// connect, so backoff here would be paid on each cache call.
    fn manager_config(&self) -> ConnectionManagerConfig {
        ConnectionManagerConfig::new()
            .set_number_of_retries(0)
            .set_connection_timeout(self.op_timeout)
            .set_response_timeout(self.op_timeout)
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let manager = timeout(
            self.op_timeout,
            self.connection.get_or_try_init(|| {
                ConnectionManager::new_with_config(self.client.clone(), self.manager_config())
            }),
        )
        .await
        .map_err(|_| CacheError::Unavailable("timed out connecting to redis".into()))?
        .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        Ok(manager.clone())
    }
}

/// Stored entry as written by any producer sharing the key space; rate keys
/// may include codes outside the supported catalogue.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    base_currency: CurrencyCode,
    rates: HashMap<String, f64>,
    timestamp: i64,
}

/// Decodes a stored value, checking it belongs to `base` and is well-formed.
/// Unknown rate codes are dropped.
pub(crate) fn decode_snapshot(base: CurrencyCode, raw: &str) -> Result<RateSnapshot, CacheError> {
    let entry: StoredEntry =
        serde_json::from_str(raw).map_err(|e| CacheError::Corrupt(e.to_string()))?;

    let rates: HashMap<CurrencyCode, f64> = entry
        .rates
        .into_iter()
        .filter_map(|(code, rate)| CurrencyCode::parse(&code).ok().map(|c| (c, rate)))
        .collect();

    let snapshot = RateSnapshot::new(entry.base_currency, rates, entry.timestamp)
        .map_err(|e| CacheError::Corrupt(e.to_string()))?;

    if snapshot.base_currency() != base {
        return Err(CacheError::Corrupt(format!(
            "entry for {} holds rates for {}",
            base,
            snapshot.base_currency()
        )));
    }

    Ok(snapshot)
}

#[async_trait]
impl RateCache for RedisCache {
    async fn get(&self, base: CurrencyCode) -> Result<Option<RateSnapshot>, CacheError> {
        let mut conn = self.connection().await?;
        let key = cache_key(base);

        let raw = timeout(self.op_timeout, conn.get::<_, Option<String>>(&key))
            .await
            .map_err(|_| CacheError::Unavailable(format!("GET {} timed out", key)))?
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;

        match raw {
            Some(raw) => decode_snapshot(base, &raw).map(Some),
            None => {
                debug!(%key, "redis miss");
                Ok(None)
            }
        }
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

        let payload =
            serde_json::to_string(snapshot).map_err(|e| CacheError::Corrupt(e.to_string()))?;
        let mut conn = self.connection().await?;
        let key = cache_key(base);

        timeout(
            self.op_timeout,
            conn.set_ex::<_, _, ()>(&key, payload, ttl_seconds),
        )
        .await
        .map_err(|_| CacheError::Unavailable(format!("SETEX {} timed out", key)))?
        .map_err(|e| CacheError::Unavailable(e.to_string()))
    }
}
