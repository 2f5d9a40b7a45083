//! Server assembly and lifecycle.

use std::net::SocketAddr;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::ScanTokenConfig, router::create_router, state::AppState};
use inventory_db::InventoryDb;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address
    pub host: String,
    /// Port
    pub port: u16,
    /// Whether to answer cross-origin requests (on for browser frontends)
    pub enable_cors: bool,
    /// Shared secret for the fingerprint report; unset leaves it unreachable
    pub scan_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_PORT,
            enable_cors: true,
            scan_token: None,
        }
    }
}

/// Build the application router and its bind address.
pub fn create_server(db: InventoryDb, config: &ApiConfig) -> Result<(Router, SocketAddr), std::net::AddrParseError> {
    let state = AppState::new(db, ScanTokenConfig::new(config.scan_token.clone()));
    let mut app = create_router(state).layer(TraceLayer::new_for_http());
    if config.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    Ok((app, addr))
}

/// Serve until the process is stopped.
pub async fn run_server(db: InventoryDb, config: &ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (app, addr) = create_server(db, config)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "inventory API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
