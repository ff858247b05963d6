//! # Currency Conversion Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the rate cache and the upstream provider
//! - Create the conversion service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fx_adapters::{ExchangeRateApi, UpstreamConfig, build_cache};
use fx_hex::{ConversionService, EngineSettings, inbound::HttpServer};

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("currency-conversion"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = config::Config::from_env()?;

    // OpenTelemetry export only when a collector is configured
    let otel = config
        .otlp_endpoint
        .as_deref()
        .map(init_tracer)
        .transpose()?;
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fx_app=debug,fx_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting currency conversion server on port {}", config.port);

    // Redis connects lazily, an unreachable server only degrades to cache misses
    let cache = build_cache(&config.cache_url)?;
    tracing::info!("Using {} rate cache (ttl {}s)", cache.backend(), config.cache_ttl_seconds);

    let mut upstream = UpstreamConfig {
        api_key: config.api_key.clone(),
        timeout: config.upstream_timeout,
        ..UpstreamConfig::default()
    };
    if let Some(base_url) = &config.upstream_base_url {
        upstream.base_url = base_url.clone();
    }
    if upstream.api_key.is_none() {
        tracing::warn!("EXCHANGE_RATE_API_KEY not set, using the free endpoint");
    }
    let provider = ExchangeRateApi::new(upstream)?;

    let settings = EngineSettings {
        ttl_seconds: config.cache_ttl_seconds,
        ..EngineSettings::default()
    };
    let service = ConversionService::with_settings(cache, provider, settings);

    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
