//! ExchangeRate-API upstream provider.
//!
//! Fetches the latest rate table for a base currency from
//! `https://v6.exchangerate-api.com/v6`. Without an API key the free
//! endpoint shape (`/free/latest/<BASE>`) is used, otherwise
//! `/<key>/latest/<BASE>`.
//!
//! Failures are classified for the conversion engine:
//! - transport errors and timeouts: [`UpstreamError::Unreachable`]
//! - an `error-type` payload: [`UpstreamError::Rejected`]
//! - anything without `"result": "success"` and a rate table: [`UpstreamError::Malformed`]

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{info, instrument};

use fx_types::{CurrencyCode, RateProvider, RateSnapshot, UpstreamError};

/// Provider ID used in logs.
const PROVIDER_ID: &str = "exchangerate-api";

pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Bound on every upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("fx-rates/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`ExchangeRateApi`].
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// `None` or `"free"` selects the keyless endpoint.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl UpstreamConfig {
    /// URL of the latest-rates resource for `base`.
    pub fn latest_url(&self, base: CurrencyCode) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        match self.api_key.as_deref() {
            None | Some("free") | Some("") => format!("{}/free/latest/{}", base_url, base),
            Some(key) => format!("{}/{}/latest/{}", base_url, key, base),
        }
    }
}

/// Union of the success and error payloads.
#[derive(Debug, Deserialize)]
struct ApiPayload {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    conversion_rates: Option<HashMap<String, f64>>,
}

/// [`RateProvider`] backed by ExchangeRate-API.
pub struct ExchangeRateApi {
    client: Client,
    config: UpstreamConfig,
}

impl ExchangeRateApi {
    pub fn new(config: UpstreamConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApi {
    fn name(&self) -> &'static str {
        PROVIDER_ID
    }

    #[instrument(skip(self), fields(provider = PROVIDER_ID))]
    async fn fetch(&self, base: CurrencyCode) -> Result<RateSnapshot, UpstreamError> {
        let url = self.config.latest_url(base);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, self.config.timeout))?;

        let fetched_at = chrono::Utc::now().timestamp_millis();
        let snapshot = parse_payload(base, status, &body, fetched_at)?;

        info!(
            %base,
            rates = snapshot.rates().len(),
            "fetched latest rates"
        );
        Ok(snapshot)
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Unreachable(format!("request timed out after {:?}", timeout))
    } else {
        // The URL may embed the API key.
        UpstreamError::Unreachable(err.without_url().to_string())
    }
}

/// Turns a raw upstream response into a snapshot, classifying failures.
///
/// Rates for codes outside the supported catalogue are dropped.
pub(crate) fn parse_payload(
    base: CurrencyCode,
    status: StatusCode,
    body: &[u8],
    fetched_at_epoch_millis: i64,
) -> Result<RateSnapshot, UpstreamError> {
    let payload = serde_json::from_slice::<ApiPayload>(body);

    if let Ok(ApiPayload {
        error_type: Some(error_type),
        ..
    }) = &payload
    {
        return Err(UpstreamError::Rejected {
            error_type: error_type.clone(),
        });
    }

    if status.is_server_error() {
        return Err(UpstreamError::Unreachable(format!("HTTP {}", status)));
    }
    if !status.is_success() {
        return Err(UpstreamError::Rejected {
            error_type: format!("http-{}", status.as_u16()),
        });
    }

    let payload = payload.map_err(|e| UpstreamError::Malformed(e.to_string()))?;

    if payload.result.as_deref() != Some("success") {
        return Err(UpstreamError::Malformed(format!(
            "API returned unsuccessful result: {}",
            payload.result.as_deref().unwrap_or("<missing>")
        )));
    }

    let raw_rates = payload
        .conversion_rates
        .ok_or_else(|| UpstreamError::Malformed("missing conversion_rates".into()))?;

    let rates: HashMap<CurrencyCode, f64> = raw_rates
        .into_iter()
        .filter_map(|(code, rate)| CurrencyCode::parse(&code).ok().map(|c| (c, rate)))
        .collect();

    RateSnapshot::new(base, rates, fetched_at_epoch_millis)
        .map_err(|e| UpstreamError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{Json, Router, extract::Path, http::StatusCode as AxumStatus, routing::get};
    use serde_json::json;

    const SUCCESS: &str = r#"{
        "result": "success",
        "base_code": "USD",
        "conversion_rates": { "USD": 1, "EUR": 0.92, "GBP": 0.79, "XYZ": 12.5 }
    }"#;

    // ─────────────────────────────────────────────────────────────────────────
    // Payload classification
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_success_payload() {
        let snapshot =
            parse_payload(CurrencyCode::USD, StatusCode::OK, SUCCESS.as_bytes(), 77).unwrap();
        assert_eq!(snapshot.base_currency(), CurrencyCode::USD);
        assert_eq!(snapshot.rate_for(CurrencyCode::EUR), Some(0.92));
        assert_eq!(snapshot.fetched_at_epoch_millis(), 77);
        // "XYZ" is not a supported code
        assert_eq!(snapshot.rates().len(), 3);
    }

    #[test]
    fn test_error_payload_is_rejected() {
        let body = br#"{"result":"error","error-type":"quota-reached"}"#;
        let result = parse_payload(CurrencyCode::USD, StatusCode::FORBIDDEN, body, 0);
        assert!(matches!(
            result,
            Err(UpstreamError::Rejected { ref error_type }) if error_type == "quota-reached"
        ));
    }

    #[test]
    fn test_missing_success_marker_is_malformed() {
        let body = br#"{"conversion_rates":{"EUR":0.92}}"#;
        let result = parse_payload(CurrencyCode::USD, StatusCode::OK, body, 0);
        assert!(matches!(result, Err(UpstreamError::Malformed(_))));

        let body = br#"{"result":"pending","conversion_rates":{"EUR":0.92}}"#;
        let result = parse_payload(CurrencyCode::USD, StatusCode::OK, body, 0);
        assert!(matches!(result, Err(UpstreamError::Malformed(_))));
    }

    #[test]
    fn test_missing_rates_is_malformed() {
        let body = br#"{"result":"success"}"#;
        let result = parse_payload(CurrencyCode::USD, StatusCode::OK, body, 0);
        assert!(matches!(result, Err(UpstreamError::Malformed(_))));
    }

    #[test]
    fn test_non_json_body() {
        let result = parse_payload(CurrencyCode::USD, StatusCode::OK, b"<html>", 0);
        assert!(matches!(result, Err(UpstreamError::Malformed(_))));

        let result = parse_payload(CurrencyCode::USD, StatusCode::BAD_GATEWAY, b"<html>", 0);
        assert!(matches!(result, Err(UpstreamError::Unreachable(_))));

        let result = parse_payload(CurrencyCode::USD, StatusCode::NOT_FOUND, b"", 0);
        assert!(matches!(
            result,
            Err(UpstreamError::Rejected { ref error_type }) if error_type == "http-404"
        ));
    }

    #[test]
    fn test_bad_self_rate_is_malformed() {
        let body = br#"{"result":"success","conversion_rates":{"USD":2.0}}"#;
        let result = parse_payload(CurrencyCode::USD, StatusCode::OK, body, 0);
        assert!(matches!(result, Err(UpstreamError::Malformed(_))));
    }

    #[test]
    fn test_url_shapes() {
        let mut config = UpstreamConfig::default();
        assert_eq!(
            config.latest_url(CurrencyCode::USD),
            "https://v6.exchangerate-api.com/v6/free/latest/USD"
        );

        config.api_key = Some("free".into());
        assert_eq!(
            config.latest_url(CurrencyCode::EUR),
            "https://v6.exchangerate-api.com/v6/free/latest/EUR"
        );

        config.api_key = Some("abc123".into());
        config.base_url = "http://localhost:9000/v6/".into();
        assert_eq!(
            config.latest_url(CurrencyCode::GBP),
            "http://localhost:9000/v6/abc123/latest/GBP"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Against a local HTTP server
    // ─────────────────────────────────────────────────────────────────────────

    async fn latest(
        Path((key, base)): Path<(String, String)>,
    ) -> (AxumStatus, Json<serde_json::Value>) {
        match key.as_str() {
            "free" | "good-key" => {
                let mut rates = serde_json::Map::new();
                rates.insert(base.clone(), json!(1));
                rates.insert("JPY".to_string(), json!(149.5));
                (
                    AxumStatus::OK,
                    Json(json!({
                        "result": "success",
                        "base_code": base,
                        "conversion_rates": rates
                    })),
                )
            }
            "slow" => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                (AxumStatus::OK, Json(json!({ "result": "success" })))
            }
            _ => (
                AxumStatus::FORBIDDEN,
                Json(json!({ "result": "error", "error-type": "invalid-key" })),
            ),
        }
    }

    async fn spawn_server() -> String {
        let app = Router::new().route("/{key}/latest/{base}", get(latest));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn provider(base_url: String, api_key: Option<&str>, timeout: Duration) -> ExchangeRateApi {
        ExchangeRateApi::new(UpstreamConfig {
            base_url,
            api_key: api_key.map(String::from),
            timeout,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_free_endpoint() {
        let base_url = spawn_server().await;
        let api = provider(base_url, None, DEFAULT_TIMEOUT);

        let snapshot = api.fetch(CurrencyCode::EUR).await.unwrap();
        assert_eq!(snapshot.base_currency(), CurrencyCode::EUR);
        assert_eq!(snapshot.rate_for(CurrencyCode::EUR), Some(1.0));
        assert_eq!(snapshot.rate_for(CurrencyCode::JPY), Some(149.5));
    }

    #[tokio::test]
    async fn test_fetch_keyed_endpoint() {
        let base_url = spawn_server().await;
        let api = provider(base_url, Some("good-key"), DEFAULT_TIMEOUT);

        let snapshot = api.fetch(CurrencyCode::USD).await.unwrap();
        assert_eq!(snapshot.rate_for(CurrencyCode::JPY), Some(149.5));
    }

    #[tokio::test]
    async fn test_fetch_invalid_key_is_rejected() {
        let base_url = spawn_server().await;
        let api = provider(base_url, Some("bad-key"), DEFAULT_TIMEOUT);

        let result = api.fetch(CurrencyCode::USD).await;
        assert!(matches!(
            result,
            Err(UpstreamError::Rejected { ref error_type }) if error_type == "invalid-key"
        ));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_unreachable() {
        let base_url = spawn_server().await;
        let api = provider(base_url, Some("slow"), Duration::from_millis(200));

        let result = api.fetch(CurrencyCode::USD).await;
        assert!(matches!(result, Err(UpstreamError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_unreachable() {
        let api = provider("http://127.0.0.1:1".into(), None, DEFAULT_TIMEOUT);

        let result = api.fetch(CurrencyCode::USD).await;
        assert!(matches!(result, Err(UpstreamError::Unreachable(_))));
    }
}
