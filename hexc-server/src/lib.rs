//! HexC Server - HTTP host for the rules engine
//!
//! This crate provides the web backend:
//! - Match creation and lookup keyed by match id
//! - Status, board and move endpoints per match
//! - Board geometry and health endpoints
//! - Static file serving for a browser client

mod routes;
mod state;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

pub use state::{CreateError, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5235,
            static_dir: "wwwroot".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and geometry
        .route("/api/status", get(routes::status::status_handler))
        .route("/api/board", get(routes::board::get_board))
        // Match API
        .route("/game/create", post(routes::game::create_game))
        .route("/game/status", get(routes::game::get_status))
        .route("/game/board", get(routes::game::get_board))
        .route("/game/move", post(routes::game::submit_move))
        // Shared state
        .with_state(state)
        .layer(cors)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new());
    let router = create_router(&config, state);

    tracing::info!("HexC Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
