//! # FX Hex
//!
//! Conversion engine and HTTP adapter for the currency conversion service.
//!
//! ## Architecture
//!
//! - `service/` - Conversion engine (cache lookup, upstream fetch, arithmetic)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The engine is generic over `C: RateCache` and `P: RateProvider`, allowing
//! different cache stores and rate sources to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{ConversionService, EngineSettings};
