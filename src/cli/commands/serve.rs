//! HTTP API command.

use anyhow::Context;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::server::{self, AppState};

/// Run the HTTP API until Ctrl-C
pub fn cmd_serve(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config).context("failed to set up API clients")?;

    tracing::info!(ml_service = %config.services.ml_service_url, "Starting server");

    rt.block_on(server::serve(config.server.socket_addr(), state))?;
    Ok(())
}
