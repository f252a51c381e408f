//! Serve command - host matches over HTTP
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: resolve_config(), serve_blocking()
//! - Level 3: check_port(), check_static_dir()
//! - Level 4: the match server itself (hexc-server)
//!
//! Flags left unset fall back to `ServerConfig::default()`, so the CLI and
//! the standalone launcher agree on where a match server listens.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use hexc_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args, Default)]
pub struct ServerArgs {
    /// Port the match server listens on [default: 5235]
    #[arg(long)]
    pub port: Option<u16>,

    /// Browser client files served next to the match API [default: wwwroot]
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run serve command
///
/// 1. Resolve flags against the server defaults
/// 2. Serve matches until interrupted
pub fn run(args: ServerArgs) -> Result<()> {
    let config = resolve_config(args)?;

    tracing::info!(
        port = config.port,
        static_dir = %config.static_dir,
        "hosting HexC matches (POST /game/create, /game/move; GET /game/status, /game/board)"
    );

    serve_blocking(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Overlay the given flags on `ServerConfig::default()`
fn resolve_config(args: ServerArgs) -> Result<ServerConfig> {
    let defaults = ServerConfig::default();

    let port = args.port.unwrap_or(defaults.port);
    check_port(port)?;

    let static_dir = match args.static_dir {
        Some(dir) => {
            check_static_dir(&dir)?;
            dir.to_string_lossy().into_owned()
        }
        None => {
            check_static_dir(Path::new(&defaults.static_dir))?;
            defaults.static_dir
        }
    };

    Ok(ServerConfig { port, static_dir })
}

/// Own a tokio runtime for the lifetime of the server
fn serve_blocking(config: ServerConfig) -> Result<()> {
    tokio::runtime::Runtime::new()
        .context("failed to start tokio runtime")?
        .block_on(run_server(config))
}

// ============================================================================
// LEVEL 3 - CHECKS
// ============================================================================

/// Clients address a match server by a known port; an ephemeral one is useless
fn check_port(port: u16) -> Result<()> {
    if port == 0 {
        anyhow::bail!("--port must name a fixed port, not 0");
    }
    Ok(())
}

/// A missing client directory only disables the browser client
fn check_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "no browser client at {}; serving the match API only",
            path.display()
        );
        return Ok(());
    }
    if !path.is_dir() {
        anyhow::bail!("browser client path is not a directory: {}", path.display());
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
