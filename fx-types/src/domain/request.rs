//! Validated conversion request.

use crate::CurrencyCode;
use crate::error::DomainError;

/// Smallest amount accepted for conversion.
pub const MIN_AMOUNT: f64 = 0.01;

/// Largest amount accepted for conversion.
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// A conversion request whose amount and currencies have been validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRequest {
    amount: f64,
    from: CurrencyCode,
    to: CurrencyCode,
}

impl ConversionRequest {
    /// Creates a request from typed currencies, validating the amount.
    pub fn new(amount: f64, from: CurrencyCode, to: CurrencyCode) -> Result<Self, DomainError> {
        Ok(Self {
            amount: validate_amount(amount)?,
            from,
            to,
        })
    }

    /// Creates a request from raw input; currency codes are case-insensitive.
    pub fn parse(amount: f64, from: &str, to: &str) -> Result<Self, DomainError> {
        let amount = validate_amount(amount)?;
        let from = CurrencyCode::parse(from)?;
        let to = CurrencyCode::parse(to)?;
        Ok(Self { amount, from, to })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn from(&self) -> CurrencyCode {
        self.from
    }

    pub fn to(&self) -> CurrencyCode {
        self.to
    }

    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }
}

/// Checks that `amount` lies within `[MIN_AMOUNT, MAX_AMOUNT]`.
pub fn validate_amount(amount: f64) -> Result<f64, DomainError> {
    if amount.is_finite() && (MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
        Ok(amount)
    } else {
        Err(DomainError::AmountOutOfRange {
            amount,
            min: MIN_AMOUNT,
            max: MAX_AMOUNT,
        })
    }
}
