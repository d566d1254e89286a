//! Recommendation commands.

use anyhow::Context;
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::recommend::{Mood, MoodRequest, ProxyError, RecommenderClient, SongRequest};

fn client(config: &Config) -> anyhow::Result<RecommenderClient> {
    RecommenderClient::new(
        config.services.ml_service_url.clone(),
        config.services.ml_timeout(),
    )
    .context("failed to set up ML service client")
}

fn print_answer(answer: Result<Value, ProxyError>) -> anyhow::Result<()> {
    match answer {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(ProxyError::Upstream { status, body }) => {
            eprintln!("✗ ML service returned HTTP {}", status);
            eprintln!("{}", serde_json::to_string_pretty(&body)?);
            anyhow::bail!("recommendation request rejected")
        }
        Err(e) => Err(e.into()),
    }
}

/// The request the web UI sends after "load more" was pressed `pages - 1` times
fn paged_song_request(song: &str, artist: &str, count: u32, pages: u32) -> SongRequest {
    let first = SongRequest {
        num_recommendations: count,
        ..SongRequest::new(song, artist)
    };
    (1..pages).fold(first, |request, _| request.load_more())
}

/// Recommend songs similar to `song` by `artist`
pub fn cmd_recommend_song(
    rt: &Runtime,
    config: &Config,
    song: &str,
    artist: &str,
    count: u32,
    pages: u32,
) -> anyhow::Result<()> {
    let client = client(config)?;
    let request = paged_song_request(song, artist, count, pages);
    print_answer(rt.block_on(client.recommend_song(&request)))
}

/// Recommend songs for a mood, optionally filtered by genre tags
pub fn cmd_recommend_mood(
    rt: &Runtime,
    config: &Config,
    mood: Mood,
    tags: &[String],
    count: u32,
) -> anyhow::Result<()> {
    let client = client(config)?;
    let request = MoodRequest {
        num_recommendations: count,
        ..MoodRequest::new(mood, tags.to_vec())
    };
    print_answer(rt.block_on(client.recommend_mood(&request)))
}
