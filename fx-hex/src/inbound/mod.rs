//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the conversion engine.

pub(crate) mod handlers;
mod server;

pub use handlers::AppState;
pub use server::HttpServer;
