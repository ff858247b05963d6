//! # FX Types
//!
//! Domain types and port traits for the currency conversion service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Rate snapshots, conversion requests and results
//! - `ports/` - Cache and upstream provider traits that adapters implement
//! - `dto/` - Data Transfer Objects for the HTTP boundary
//! - `error/` - Domain, conversion and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

pub use fx_currency::{CurrencyCode, CurrencyParseError};

// Re-export commonly used types
pub use domain::{
    ConversionRequest, ConversionResult, MAX_AMOUNT, MIN_AMOUNT, Provenance, RateSnapshot,
};
pub use dto::*;
pub use error::{AppError, ConversionError, DomainError, ErrorKind, RateUnavailable};
pub use ports::{
    CacheError, DEFAULT_TTL_SECONDS, RateCache, RateProvider, UpstreamError, cache_key,
};
