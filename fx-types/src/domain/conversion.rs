//! Result of a single conversion.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where the exchange rate of a conversion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Source and target currency are equal; no lookup was performed.
    Identity,
    /// The snapshot used is younger than the freshness window.
    Cache,
    /// The snapshot used is at least as old as the freshness window.
    ///
    /// This label is purely age-based: it does not mean the snapshot was
    /// fetched during this call.
    Fresh,
}

impl Provenance {
    /// Classifies a snapshot by age: strictly younger than `window_millis` is
    /// `Cache`, anything else is `Fresh`.
    pub fn from_age(age_millis: i64, window_millis: i64) -> Self {
        if age_millis < window_millis {
            Provenance::Cache
        } else {
            Provenance::Fresh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Identity => "identity",
            Provenance::Cache => "cache",
            Provenance::Fresh => "fresh",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one conversion. No rounding is applied to `converted_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub converted_amount: f64,
    pub exchange_rate: f64,
    /// Fetch time of the snapshot used, or the call time for identity conversions.
    pub rate_timestamp: DateTime<Utc>,
    pub provenance: Provenance,
}

impl ConversionResult {
    /// Identity conversion: the amount is returned unchanged at rate 1.
    pub fn identity(amount: f64, now: DateTime<Utc>) -> Self {
        Self {
            converted_amount: amount,
            exchange_rate: 1.0,
            rate_timestamp: now,
            provenance: Provenance::Identity,
        }
    }
}
