//! Domain models for the conversion service.

pub mod conversion;
pub mod request;
pub mod snapshot;

pub use conversion::{ConversionResult, Provenance};
pub use request::{ConversionRequest, MAX_AMOUNT, MIN_AMOUNT};
pub use snapshot::RateSnapshot;
