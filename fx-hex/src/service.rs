//! Conversion Engine
//!
//! Decides whether to serve a cached rate snapshot or fetch a fresh one,
//! classifies failures and computes the converted amount.
//! Contains NO infrastructure logic - only the rate-acquisition policy.
//!
//! Per call: validate → identity short-circuit, or cache lookup → (hit | miss
//! → fetch → best-effort store) → compute. There are no retries and no
//! fallback rates; concurrent misses for the same base may each fetch.

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

use fx_types::domain::request::validate_amount;
use fx_types::{
    ConversionError, ConversionRequest, ConversionResult, CurrencyCode, DEFAULT_TTL_SECONDS,
    Provenance, RateCache, RateProvider, RateSnapshot, RateUnavailable,
};

/// Tunables of the conversion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Lifetime given to snapshots written to the cache.
    pub ttl_seconds: u64,
    /// Snapshots strictly younger than this are labelled [`Provenance::Cache`].
    pub freshness_window_ms: i64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            freshness_window_ms: 3_600_000,
        }
    }
}

/// Currency conversion engine.
///
/// Generic over `C: RateCache` and `P: RateProvider` - both are injected at
/// construction, so tests can substitute in-memory fakes.
pub struct ConversionService<C: RateCache, P: RateProvider> {
    cache: C,
    provider: P,
    settings: EngineSettings,
}

impl<C: RateCache, P: RateProvider> ConversionService<C, P> {
    /// Creates an engine with default settings.
    pub fn new(cache: C, provider: P) -> Self {
        Self::with_settings(cache, provider, EngineSettings::default())
    }

    pub fn with_settings(cache: C, provider: P, settings: EngineSettings) -> Self {
        Self {
            cache,
            provider,
            settings,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn cache_ttl_seconds(&self) -> u64 {
        self.settings.ttl_seconds
    }

    /// Currencies accepted by [`convert`](Self::convert), in canonical order.
    pub fn supported_currencies(&self) -> Vec<CurrencyCode> {
        CurrencyCode::all().to_vec()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount` from one currency to another given raw currency codes.
    pub async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ConversionError> {
        let request = ConversionRequest::parse(amount, from, to)?;
        self.convert_request(&request).await
    }

    /// Converts an already-parsed request at the current time.
    pub async fn convert_request(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        self.convert_at(request, Utc::now()).await
    }

    /// Converts `request` treating `now` as the current time.
    #[instrument(
        skip(self, request),
        fields(amount = request.amount(), from = %request.from(), to = %request.to())
    )]
    pub async fn convert_at(
        &self,
        request: &ConversionRequest,
        now: DateTime<Utc>,
    ) -> Result<ConversionResult, ConversionError> {
        let amount = validate_amount(request.amount())?;

        if request.is_identity() {
            return Ok(ConversionResult::identity(amount, now));
        }

        let snapshot = self.snapshot_for(request.from()).await?;

        let rate = snapshot
            .rate_for(request.to())
            .ok_or(RateUnavailable::MissingTarget {
                base: request.from(),
                target: request.to(),
            })?;

        let age = snapshot.age_millis(now.timestamp_millis());

        Ok(ConversionResult {
            converted_amount: amount * rate,
            exchange_rate: rate,
            rate_timestamp: snapshot.fetched_at(),
            provenance: Provenance::from_age(age, self.settings.freshness_window_ms),
        })
    }

    /// Returns the snapshot for `base` from the cache, fetching it on a miss.
    ///
    /// Cache failures never abort the call: a failed read counts as a miss
    /// and a failed write only loses the cached copy.
    async fn snapshot_for(&self, base: CurrencyCode) -> Result<RateSnapshot, ConversionError> {
        match self.cache.get(base).await {
            Ok(Some(snapshot)) => {
                info!(%base, "using cached rates");
                return Ok(snapshot);
            }
            Ok(None) => {}
            Err(e) => warn!(%base, error = %e, "cache read failed, treating as miss"),
        }

        info!(%base, provider = self.provider.name(), "fetching fresh rates");
        let snapshot = self.provider.fetch(base).await.map_err(|e| {
            error!(%base, error = %e, "failed to fetch exchange rates");
            e
        })?;

        if let Err(e) = self
            .cache
            .put(base, &snapshot, self.settings.ttl_seconds)
            .await
        {
            warn!(%base, error = %e, "failed to cache fetched rates");
        }

        Ok(snapshot)
    }
}
