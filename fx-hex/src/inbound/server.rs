//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use fx_types::{RateCache, RateProvider};

use super::handlers::{self, AppState};
use crate::ConversionService;

/// HTTP Server for the currency conversion API.
pub struct HttpServer<C: RateCache, P: RateProvider> {
    state: Arc<AppState<C, P>>,
}

impl<C: RateCache, P: RateProvider> HttpServer<C, P> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: ConversionService<C, P>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health::<C, P>))
            .route("/currency/health", get(handlers::health::<C, P>))
            .route("/currency/supported", get(handlers::supported::<C, P>))
            .route("/currency/convert", get(handlers::convert::<C, P>))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
