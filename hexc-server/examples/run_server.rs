//! Example to run the HexC server standalone
//!
//! Run with: cargo run -p hexc-server --example run_server

use hexc_server::{run_server, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::default();

    println!("Starting HexC server on port {}", config.port);
    println!("Create a match: curl -X POST 'http://localhost:{}/game/create?gameId=demo'", config.port);

    run_server(config).await
}
