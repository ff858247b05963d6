//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The conversion engine depends on these traits, not concrete implementations.

mod cache;
mod provider;

pub use cache::{CacheError, DEFAULT_TTL_SECONDS, RateCache, cache_key};
pub use provider::{RateProvider, UpstreamError};
