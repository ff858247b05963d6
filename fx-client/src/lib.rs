//! # Currency Conversion Client SDK
//!
//! A typed Rust client for the currency conversion API.

use fx_types::{ConversionResponse, HealthResponse, SupportedCurrenciesResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A conversion result together with the server's `X-Cache-Status` header.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    pub response: ConversionResponse,
    /// `identity`, `cache` or `fresh`; `None` if the header was absent.
    pub cache_status: Option<String>,
}

/// Currency conversion API client.
pub struct FxClient {
    base_url: String,
    http: Client,
}

impl FxClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Converts `amount` from one currency to another.
    pub async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConvertOutcome, ClientError> {
        let resp = self
            .http
            .get(format!("{}/currency/convert", self.base_url))
            .query(&[
                ("amount", amount.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
            ])
            .send()
            .await?;

        let cache_status = resp
            .headers()
            .get("x-cache-status")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let response = self.handle_response(resp).await?;

        Ok(ConvertOutcome {
            response,
            cache_status,
        })
    }

    /// Lists the currencies the server accepts.
    pub async fn supported(&self) -> Result<SupportedCurrenciesResponse, ClientError> {
        self.get("/currency/supported").await
    }

    /// Fetches the service health report.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/currency/health").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::get,
    };
    use serde_json::json;

    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FxClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = FxClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    async fn fake_convert(
        Query(params): Query<std::collections::HashMap<String, String>>,
    ) -> impl IntoResponse {
        if params.get("to").map(String::as_str) == Some("XXX") {
            return (
                StatusCode::BAD_REQUEST,
                HeaderMap::new(),
                Json(json!({ "error": "Unsupported currency: XXX" })),
            );
        }
        let mut headers = HeaderMap::new();
        headers.insert("x-cache-status", "fresh".parse().unwrap());
        (
            StatusCode::OK,
            headers,
            Json(json!({
                "original": { "amount": 100.0, "currency": "USD" },
                "converted": { "amount": 92.0, "currency": "EUR" },
                "exchange_rate": 0.92,
                "timestamp": "2024-01-01T00:00:00.000Z"
            })),
        )
    }

    async fn spawn_fake_server() -> String {
        let app = Router::new().route("/currency/convert", get(fake_convert));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_convert_reads_body_and_cache_status() {
        let client = FxClient::new(spawn_fake_server().await);

        let outcome = client.convert(100.0, "USD", "EUR").await.unwrap();
        assert_eq!(outcome.cache_status.as_deref(), Some("fresh"));
        assert_eq!(outcome.response.exchange_rate, 0.92);
        assert_eq!(outcome.response.converted.amount, 92.0);
    }

    #[tokio::test]
    async fn test_api_error_carries_server_message() {
        let client = FxClient::new(spawn_fake_server().await);

        let err = client.convert(100.0, "USD", "XXX").await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Unsupported currency: XXX");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
