//! VibeCheck - a music recommendation backend.
//!
//! Serves the HTTP API behind the VibeCheck web UI: it proxies recommendation
//! requests to the ML service and enriches tracks with Spotify metadata,
//! Spotify audio features and Genius song info. The same services are
//! available as one-shot CLI commands.

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod recommend;
pub mod server;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("vibecheck=info".parse()?))
        .init();

    cli::run_command(&args)
}
