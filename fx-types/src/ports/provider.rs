//! Upstream rate provider port.
//!
//! This trait defines the interface for exchange rate sources.
//! Implementations can be HTTP clients, fixed-table stubs, etc.

use crate::{CurrencyCode, RateSnapshot};

/// Error type for upstream fetches. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The provider answered with an explicit error payload.
    #[error("ExchangeRate API Error: {error_type}")]
    Rejected { error_type: String },

    /// Transport failure or timeout.
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    /// The payload lacks a success marker or a usable rate table.
    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

/// Port trait for upstream exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fetches the latest snapshot for `base`. A single attempt is made.
    async fn fetch(&self, base: CurrencyCode) -> Result<RateSnapshot, UpstreamError>;
}
