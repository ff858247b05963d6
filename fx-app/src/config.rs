//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;

use fx_types::DEFAULT_TTL_SECONDS;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    /// `redis://…` for the shared cache, `memory://` for a process-local one.
    pub cache_url: String,
    pub cache_ttl_seconds: u64,
    pub api_key: Option<String>,
    pub upstream_base_url: Option<String>,
    pub upstream_timeout: Duration,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, as with an empty line in `.env`.
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(v) => v.trim().parse().context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let cache_ttl_seconds: u64 = match var("CACHE_TTL_SECONDS") {
            Some(v) => v
                .trim()
                .parse()
                .context("CACHE_TTL_SECONDS must be a positive integer")?,
            None => DEFAULT_TTL_SECONDS,
        };
        if cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than zero");
        }

        let upstream_timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.trim()
                    .parse()
                    .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };
        if upstream_timeout.is_zero() {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Self {
            port,
            cache_url: var("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            cache_ttl_seconds,
            api_key: var("EXCHANGE_RATE_API_KEY"),
            upstream_base_url: var("EXCHANGE_RATE_API_URL"),
            upstream_timeout,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}
