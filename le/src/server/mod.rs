//! HTTP server
//!
//! Exposes itinerary generation and the saved itinerary collection as a
//! JSON API for the browser UI.

mod error;
pub mod http;

pub use error::{ApiError, ErrorBody};

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use eyre::{Context, Result};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::gateway::ItineraryGateway;
use crate::state::StateManager;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ItineraryGateway>,
    pub state: StateManager,
}

impl AppState {
    pub fn new(gateway: ItineraryGateway, state: StateManager) -> Self {
        Self {
            gateway: Arc::new(gateway),
            state,
        }
    }
}

/// Routes with state applied, without middleware
pub fn router(state: AppState) -> Router {
    http::routes().with_state(state)
}

/// Full application: routes plus CORS and request tracing
pub fn app(state: AppState, config: &ServerConfig) -> Result<Router> {
    debug!(origins = ?config.cors_origins, "app: called");
    Ok(router(state)
        .layer(cors_layer(&config.cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// An empty origin list allows any origin
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins = origins
            .iter()
            .map(|o| HeaderValue::from_str(o).context(format!("Invalid CORS origin: {}", o)))
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Bind and serve until ctrl-c
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<()> {
    debug!(bind_addr = %config.bind_addr, "serve: called");
    let app = app(state.clone(), config)?;
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .context(format!("Failed to bind {}", config.bind_addr))?;

    info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    state.state.shutdown().await.ok();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
