//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fx_types::dto::{
    AmountView, CacheHealth, ConversionResponse, ConvertQuery, ErrorResponse, HealthResponse,
    SupportedCurrenciesResponse,
};
use fx_types::{CurrencyCode, Provenance};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Convert an amount between two currencies
#[utoipa::path(
    get,
    path = "/currency/convert",
    tag = "currency",
    params(ConvertQuery),
    responses(
        (status = 200, description = "Conversion result; the X-Cache-Status header reports identity, cache or fresh", body = ConversionResponse),
        (status = 400, description = "Invalid amount or unsupported currency", body = ErrorResponse),
        (status = 500, description = "No rate available for the target currency", body = ErrorResponse),
        (status = 503, description = "Upstream rate provider unavailable", body = ErrorResponse)
    )
)]
async fn convert() {}

/// List supported currencies
#[utoipa::path(
    get,
    path = "/currency/supported",
    tag = "currency",
    responses(
        (status = 200, description = "Supported currency codes", body = SupportedCurrenciesResponse)
    )
)]
async fn supported() {}

/// Service health
#[utoipa::path(
    get,
    path = "/currency/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health() {}

/// OpenAPI documentation for the currency conversion API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Conversion API",
        version = "1.0.0",
        description = "Converts amounts between 40 supported currencies using cached ExchangeRate-API rates.",
        license(name = "MIT"),
    ),
    paths(convert, supported, health),
    components(
        schemas(
            ConvertQuery,
            AmountView,
            ConversionResponse,
            ErrorResponse,
            SupportedCurrenciesResponse,
            CacheHealth,
            HealthResponse,
            CurrencyCode,
            Provenance,
        )
    ),
    tags(
        (name = "currency", description = "Currency conversion operations"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/currency/convert"));
        assert!(paths.iter().any(|p| p.as_str() == "/currency/supported"));
        assert!(paths.iter().any(|p| p.as_str() == "/currency/health"));
    }
}
