//! Development tasks for the hex world
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{InspectMap, Sight};

/// Development tasks for the hex world
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for hex maps", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Summarize a map file
    InspectMap(InspectMap),

    /// Trace a sightline between two tiles
    Sight(Sight),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG and friends)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::InspectMap(cmd) => cmd.execute(),
        Command::Sight(cmd) => cmd.execute(),
    }
}
