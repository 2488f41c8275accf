//! HTTP server setup
//!
//! Serves `POST /analyze` and `GET /health` with permissive CORS and
//! shuts down gracefully on Ctrl+C or SIGTERM.

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::analyze::Analyzer;
use crate::config::Config;
use crate::error::{BrieflyError, Result};

use super::handlers::{analyze_handler, health_handler};

/// Shared application state for all handlers
///
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Request pipeline, with or without a provider
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer }
    }
}

/// The summary server
pub struct SummaryServer {
    config: Config,
}

impl SummaryServer {
    /// Create a new server with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Start the server and listen for requests
    pub async fn serve(&self) -> Result<()> {
        let analyzer = Analyzer::from_config(&self.config.provider)?;
        match analyzer.provider_name() {
            Some(name) => tracing::info!("Summaries delegated to provider: {name}"),
            None => tracing::info!("Provider not configured, local summarizer only"),
        }

        let app = create_router(Arc::new(AppState::new(analyzer)));

        let listen_addr = self.config.server.listen_addr();
        let addr: SocketAddr = listen_addr
            .parse()
            .map_err(|e| BrieflyError::Config(format!("Invalid listen address {listen_addr}: {e}")))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| BrieflyError::Server(format!("Failed to bind to {addr}: {e}")))?;

        tracing::info!("Listening on {addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| BrieflyError::Server(format!("Server error: {e}")))?;

        tracing::info!("Server shut down gracefully");
        Ok(())
    }
}

/// Create the router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
