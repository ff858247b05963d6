//! Error types for the conversion service.

use serde::Serialize;

use crate::CurrencyCode;
use crate::CurrencyParseError;
use crate::ports::UpstreamError;

/// Domain-level errors (validation and invariant violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount must be between {min} and {max}, got {amount}")]
    AmountOutOfRange { amount: f64, min: f64, max: f64 },

    #[error(transparent)]
    Currency(#[from] CurrencyParseError),

    #[error("Invalid rate snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Why no exchange rate could be produced for a conversion.
#[derive(Debug, thiserror::Error)]
pub enum RateUnavailable {
    #[error("Unable to fetch exchange rates: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Exchange rate not available for {base} to {target}")]
    MissingTarget {
        base: CurrencyCode,
        target: CurrencyCode,
    },
}

/// Errors returned by the conversion engine.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error(transparent)]
    RateUnavailable(#[from] RateUnavailable),
}

impl From<UpstreamError> for ConversionError {
    fn from(err: UpstreamError) -> Self {
        ConversionError::RateUnavailable(RateUnavailable::Upstream(err))
    }
}

/// Machine-readable classification of a [`ConversionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A currency code outside the supported set.
    UnsupportedCurrency,
    /// Any other malformed amount or currency input.
    InvalidRequest,
    /// The upstream provider rejected, failed or returned garbage.
    UpstreamUnavailable,
    /// The snapshot has no rate for the requested target currency.
    MissingRate,
}

impl ConversionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::InvalidRequest(DomainError::Currency(
                CurrencyParseError::Unsupported(_),
            )) => ErrorKind::UnsupportedCurrency,
            ConversionError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ConversionError::RateUnavailable(RateUnavailable::Upstream(_)) => {
                ErrorKind::UpstreamUnavailable
            }
            ConversionError::RateUnavailable(RateUnavailable::MissingTarget { .. }) => {
                ErrorKind::MissingRate
            }
        }
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    UnsupportedCurrency(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err.kind() {
            ErrorKind::UnsupportedCurrency => AppError::UnsupportedCurrency(err.to_string()),
            ErrorKind::InvalidRequest => AppError::BadRequest(err.to_string()),
            ErrorKind::UpstreamUnavailable => AppError::ServiceUnavailable(err.to_string()),
            ErrorKind::MissingRate => AppError::ConversionFailed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let unsupported: ConversionError =
            DomainError::Currency(CurrencyParseError::Unsupported("XXX".into())).into();
        assert_eq!(unsupported.kind(), ErrorKind::UnsupportedCurrency);

        let bad_amount: ConversionError = DomainError::AmountOutOfRange {
            amount: 0.0,
            min: 0.01,
            max: 1e9,
        }
        .into();
        assert_eq!(bad_amount.kind(), ErrorKind::InvalidRequest);

        let upstream: ConversionError = UpstreamError::Unreachable("timeout".into()).into();
        assert_eq!(upstream.kind(), ErrorKind::UpstreamUnavailable);

        let missing: ConversionError = RateUnavailable::MissingTarget {
            base: CurrencyCode::USD,
            target: CurrencyCode::ARS,
        }
        .into();
        assert_eq!(missing.kind(), ErrorKind::MissingRate);
    }

    #[test]
    fn test_app_error_mapping() {
        let err: AppError = ConversionError::from(UpstreamError::Rejected {
            error_type: "invalid-key".into(),
        })
        .into();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));

        let err: AppError = ConversionError::from(RateUnavailable::MissingTarget {
            base: CurrencyCode::USD,
            target: CurrencyCode::EUR,
        })
        .into();
        assert!(matches!(err, AppError::ConversionFailed(_)));

        let err: AppError = ConversionError::from(DomainError::Currency(
            CurrencyParseError::Unsupported("ABC".into()),
        ))
        .into();
        match err {
            AppError::UnsupportedCurrency(msg) => assert!(msg.contains("Unsupported")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
