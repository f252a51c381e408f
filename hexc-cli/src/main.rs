//! HexC CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP match server
//! - show: Print the standard starting layout
//! - simulate: Play bot-vs-bot games in-process

mod server;
mod show;
mod simulate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexc")]
#[command(about = "Three-player hexagonal chess engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP match server
    Serve(server::ServerArgs),
    /// Print the standard starting layout
    Show,
    /// Play bot-vs-bot games and summarize the results
    Simulate(simulate::SimulateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Show => {
            show::run();
            Ok(())
        }
        Commands::Simulate(args) => simulate::run(args),
    }
}
