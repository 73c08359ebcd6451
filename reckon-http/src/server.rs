use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::Router;
use reckon_core::{
    config::CoreConfig,
    record::{CalculationRepository, InMemoryCalculationRepository},
    revocation::{InMemoryRevocation, TokenRevocation, select_revocation_store},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::{AuthStore, auth_middleware};
use crate::routes::create_api_router;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Core configuration (revocation backend and ttl)
    pub core: CoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            core: CoreConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub auth_store: AuthStore,
    pub calculations: Arc<dyn CalculationRepository>,
    pub revocation: Arc<dyn TokenRevocation>,
    /// How long a key revoked through the API stays revoked
    pub revocation_ttl: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            auth_store: AuthStore::default(),
            calculations: Arc::new(InMemoryCalculationRepository::new()),
            revocation: Arc::new(InMemoryRevocation::new()),
            revocation_ttl: CoreConfig::default().revocation.default_ttl,
        }
    }
}

impl AppState {
    /// Build the state for a running server, selecting the revocation store
    pub async fn from_config(config: &CoreConfig) -> Self {
        Self {
            revocation: select_revocation_store(&config.revocation).await,
            revocation_ttl: config.revocation.default_ttl,
            ..Default::default()
        }
    }
}

/// Router with all routes, authentication and state applied
pub fn create_app(state: AppState) -> Router {
    create_api_router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState::from_config(&config.core).await;
    info!(
        revocation_backend = state.revocation.backend_name(),
        "Initialized application state"
    );

    let app = create_app(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = config.socket_addr()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
