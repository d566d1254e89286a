//! Track details command.

use anyhow::Context;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::enrichment::{EnrichmentService, TrackRef};

/// Aggregate details for one track and print the merged JSON
pub fn cmd_details(
    rt: &Runtime,
    config: &Config,
    track_id: &str,
    song: &str,
    artist: &str,
) -> anyhow::Result<()> {
    let service = EnrichmentService::new(&config.enrichment())
        .context("failed to set up enrichment clients")?;
    let track = TrackRef::new(track_id, song, artist);

    let report = rt.block_on(service.fetch_enrichment_report(&track));

    for failure in &report.failures {
        eprintln!("✗ {}: {}", failure.source, failure.error);
    }
    println!("{}", serde_json::to_string_pretty(&report.result)?);
    Ok(())
}
