//! HTTP request handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::Instrument;
use utoipa::OpenApi;

use fx_types::dto::format_timestamp;
use fx_types::{
    AppError, CacheHealth, ConversionError, ConversionRequest, ConversionResponse, ConvertQuery,
    CurrencyCode, ErrorResponse, HealthResponse, RateCache, RateProvider,
    SupportedCurrenciesResponse,
};

use crate::ConversionService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<C: RateCache, P: RateProvider> {
    pub service: ConversionService<C, P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    details: None,
                    supported_currencies: None,
                },
            ),
            AppError::UnsupportedCurrency(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    details: None,
                    supported_currencies: Some(CurrencyCode::all().to_vec()),
                },
            ),
            AppError::ServiceUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse {
                    error: "Currency conversion service temporarily unavailable".into(),
                    details: Some("Please try again later".into()),
                    supported_currencies: None,
                },
            ),
            AppError::ConversionFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Currency conversion failed".into(),
                    details: Some(msg),
                    supported_currencies: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Internal server error".into(),
                    details: Some(msg),
                    supported_currencies: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Convert an amount between two currencies.
#[tracing::instrument(skip(state, query))]
pub async fn convert<C: RateCache, P: RateProvider>(
    State(state): State<Arc<AppState<C, P>>>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let started = Instant::now();

    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = ConversionRequest::parse(query.amount, &query.from, &query.to)
        .map_err(ConversionError::from)?;

    tracing::info!(
        "Converting {} {} to {}",
        request.amount(),
        request.from(),
        request.to()
    );

    // Detached so a client disconnect cannot abandon a fetch before it is cached.
    let task_state = Arc::clone(&state);
    let result = tokio::spawn(
        async move { task_state.service.convert_request(&request).await }.in_current_span(),
    )
    .await
    .map_err(|e| AppError::Internal(format!("conversion task failed: {}", e)))?
    .map_err(|e| {
        tracing::error!(
            "Conversion failed after {}ms: {}",
            started.elapsed().as_millis(),
            e
        );
        e
    })?;

    let duration = started.elapsed().as_millis();
    tracing::info!(
        "Conversion completed in {}ms (source: {})",
        duration,
        result.provenance
    );

    Ok((
        [
            ("x-cache-status", result.provenance.to_string()),
            ("x-response-time", format!("{}ms", duration)),
            ("cache-control", "public, max-age=3600".to_string()),
        ],
        Json(ConversionResponse::new(&request, &result)),
    ))
}

/// List supported currencies.
#[tracing::instrument(skip(state))]
pub async fn supported<C: RateCache, P: RateProvider>(
    State(state): State<Arc<AppState<C, P>>>,
) -> impl IntoResponse {
    Json(SupportedCurrenciesResponse::new(
        state.service.supported_currencies(),
        Utc::now(),
    ))
}

/// Health check endpoint.
pub async fn health<C: RateCache, P: RateProvider>(
    State(state): State<Arc<AppState<C, P>>>,
) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".into(),
        service: "currency-conversion".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        cache: CacheHealth {
            status: "active".into(),
            ttl: state.service.cache_ttl_seconds(),
        },
        supported_currencies_count: state.service.supported_currencies().len(),
        timestamp: format_timestamp(Utc::now()),
    })
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
