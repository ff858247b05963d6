//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::CurrencyCode;
use crate::domain::{ConversionRequest, ConversionResult};

/// Formats a timestamp the way every response body carries it.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters of the convert endpoint. Currency codes are
/// case-insensitive and validated by the conversion engine.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertQuery {
    /// Amount to convert, between 0.01 and 1,000,000,000
    #[schema(example = 100.0)]
    pub amount: f64,
    /// Source currency code
    #[schema(example = "USD")]
    pub from: String,
    /// Target currency code
    #[schema(example = "EUR")]
    pub to: String,
}

/// An amount paired with its currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AmountView {
    #[schema(example = 100.0)]
    pub amount: f64,
    pub currency: CurrencyCode,
}

/// Successful conversion response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    pub original: AmountView,
    pub converted: AmountView,
    #[schema(example = 0.92)]
    pub exchange_rate: f64,
    /// Time of the rate snapshot used (ISO 8601)
    #[schema(example = "2024-01-01T00:00:00.000Z")]
    pub timestamp: String,
}

impl ConversionResponse {
    pub fn new(request: &ConversionRequest, result: &ConversionResult) -> Self {
        Self {
            original: AmountView {
                amount: request.amount(),
                currency: request.from(),
            },
            converted: AmountView {
                amount: result.converted_amount,
                currency: request.to(),
            },
            exchange_rate: result.exchange_rate,
            timestamp: format_timestamp(result.rate_timestamp),
        }
    }
}

/// Error body shared by all endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Present when the request named an unsupported currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_currencies: Option<Vec<CurrencyCode>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalogue & Health DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// List of supported currencies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupportedCurrenciesResponse {
    pub supported_currencies: Vec<CurrencyCode>,
    #[schema(example = 40)]
    pub total_count: usize,
    pub updated_at: String,
}

impl SupportedCurrenciesResponse {
    pub fn new(currencies: Vec<CurrencyCode>, now: DateTime<Utc>) -> Self {
        Self {
            total_count: currencies.len(),
            supported_currencies: currencies,
            updated_at: format_timestamp(now),
        }
    }
}

/// Cache section of the health report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CacheHealth {
    #[schema(example = "active")]
    pub status: String,
    /// Entry lifetime in seconds
    #[schema(example = 3600)]
    pub ttl: u64,
}

/// Service health report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "currency-conversion")]
    pub service: String,
    pub version: String,
    pub cache: CacheHealth,
    pub supported_currencies_count: usize,
    pub timestamp: String,
}
