//! Exchange-rate snapshot for a single base currency.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::CurrencyCode;
use crate::error::DomainError;

/// Conversion multipliers from one base currency to the other supported
/// currencies, as obtained from the upstream provider at one point in time.
///
/// Snapshots are immutable once built. The rate table may not cover every
/// supported currency; a missing target is a normal, reportable condition.
///
/// Serialized form (the value stored in the cache):
/// `{"baseCurrency":"USD","rates":{"EUR":0.92},"timestamp":1700000000000}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSnapshot {
    base_currency: CurrencyCode,
    rates: HashMap<CurrencyCode, f64>,
    #[serde(rename = "timestamp")]
    fetched_at_epoch_millis: i64,
}

impl RateSnapshot {
    /// Builds a snapshot, rejecting non-positive rates and a self-rate other than 1.
    pub fn new(
        base_currency: CurrencyCode,
        rates: HashMap<CurrencyCode, f64>,
        fetched_at_epoch_millis: i64,
    ) -> Result<Self, DomainError> {
        let snapshot = Self {
            base_currency,
            rates,
            fetched_at_epoch_millis,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks the snapshot invariants. Used after decoding untrusted input.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some((code, rate)) = self
            .rates
            .iter()
            .find(|(_, rate)| !rate.is_finite() || **rate <= 0.0)
        {
            return Err(DomainError::InvalidSnapshot(format!(
                "rate for {} must be a positive number, got {}",
                code, rate
            )));
        }

        match self.rates.get(&self.base_currency) {
            Some(self_rate) if *self_rate != 1.0 => Err(DomainError::InvalidSnapshot(format!(
                "self-rate for {} must be 1, got {}",
                self.base_currency, self_rate
            ))),
            _ => Ok(()),
        }
    }

    pub fn base_currency(&self) -> CurrencyCode {
        self.base_currency
    }

    pub fn rates(&self) -> &HashMap<CurrencyCode, f64> {
        &self.rates
    }

    pub fn fetched_at_epoch_millis(&self) -> i64 {
        self.fetched_at_epoch_millis
    }

    /// Fetch time as a UTC timestamp (falls back to the epoch if out of range).
    pub fn fetched_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.fetched_at_epoch_millis)
            .single()
            .unwrap_or_default()
    }

    /// Multiplier from the base currency to `target`, if the table has one.
    pub fn rate_for(&self, target: CurrencyCode) -> Option<f64> {
        self.rates.get(&target).copied()
    }

    /// Milliseconds elapsed between the fetch and `now_millis`.
    pub fn age_millis(&self, now_millis: i64) -> i64 {
        now_millis - self.fetched_at_epoch_millis
    }
}
