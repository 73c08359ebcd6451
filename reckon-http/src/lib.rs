//! Reckon HTTP API Server
//!
//! This crate provides an HTTP API for evaluating and storing calculations
//! on behalf of authenticated users.

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

use server::{ServerConfig, start_server};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than
/// once is harmless.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Start the Reckon HTTP server with the default configuration
pub async fn start() -> anyhow::Result<()> {
    init_tracing("info");
    start_server(ServerConfig::default()).await
}

/// Start the Reckon HTTP server with a custom configuration
pub async fn start_with_config(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing("info");
    start_server(config).await
}
