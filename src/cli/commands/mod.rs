//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `serve`: Run the HTTP API
//! - `details`: Aggregate track details from Spotify and Genius
//! - `recommend`: Query the ML recommendation service

mod details;
mod recommend;
mod serve;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::recommend::{DEFAULT_PAGE_SIZE, Mood};

pub use details::cmd_details;
pub use recommend::{cmd_recommend_mood, cmd_recommend_song};
pub use serve::cmd_serve;

/// VibeCheck music recommendation backend
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (default: OS config dir/vibecheck/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Settings that override the config file
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Port to listen on
    #[arg(long, env = "PORT", global = true)]
    pub port: Option<u16>,

    /// Spotify app client ID
    #[arg(long, env = "SPOTIFY_CLIENT_ID", global = true, hide_env_values = true)]
    pub spotify_client_id: Option<String>,

    /// Spotify app client secret
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", global = true, hide_env_values = true)]
    pub spotify_client_secret: Option<String>,

    /// Genius API access token
    #[arg(long, env = "GENIUS_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub genius_access_token: Option<String>,

    /// Base URL of the ML recommendation service
    #[arg(long, env = "ML_SERVICE_URL", global = true)]
    pub ml_service_url: Option<String>,
}

impl Overrides {
    /// Apply every override that was given
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(id) = &self.spotify_client_id {
            config.credentials.spotify_client_id = Some(id.clone());
        }
        if let Some(secret) = &self.spotify_client_secret {
            config.credentials.spotify_client_secret = Some(secret.clone());
        }
        if let Some(token) = &self.genius_access_token {
            config.credentials.genius_access_token = Some(token.clone());
        }
        if let Some(url) = &self.ml_service_url {
            config.services.ml_service_url = url.clone();
        }
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,
    /// Fetch metadata, audio features and Genius info for a track
    Details {
        /// Spotify track ID
        track_id: String,
        /// Song title, used for the Genius search
        #[arg(long)]
        song: String,
        /// Artist name, used for the Genius search
        #[arg(long)]
        artist: String,
    },
    /// Ask the ML service for recommendations
    Recommend {
        #[command(subcommand)]
        target: RecommendTarget,
    },
}

/// What to base recommendations on
#[derive(Subcommand)]
pub enum RecommendTarget {
    /// Songs similar to a known song
    Song {
        #[arg(long)]
        song: String,
        #[arg(long)]
        artist: String,
        /// Number of recommendations on the first page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        count: u32,
        /// Pages to fetch; each page beyond the first adds one more page size
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },
    /// Songs matching a mood
    Mood {
        #[arg(value_enum)]
        mood: Mood,
        /// Genre tag filter (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Number of recommendations
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        count: u32,
    },
}

/// Resolve configuration from the file and command-line overrides.
///
/// An explicit `--config` file must load; the default location may be absent.
pub fn resolve_config(cli: &Cli) -> crate::error::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load(),
    };
    cli.overrides.apply(&mut config);
    Ok(config)
}

/// Run the specified CLI command, or the server when none is given.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli)?;
    let rt = Runtime::new()?;

    match &cli.command {
        None | Some(Commands::Serve) => cmd_serve(&rt, &config),
        Some(Commands::Details {
            track_id,
            song,
            artist,
        }) => cmd_details(&rt, &config, track_id, song, artist),
        Some(Commands::Recommend {
            target:
                RecommendTarget::Song {
                    song,
                    artist,
                    count,
                    pages,
                },
        }) => cmd_recommend_song(&rt, &config, song, artist, *count, *pages),
        Some(Commands::Recommend {
            target: RecommendTarget::Mood { mood, tags, count },
        }) => cmd_recommend_mood(&rt, &config, *mood, tags, *count),
    }
}
