//! Configuration system using TOML files.
//!
//! Config is read from the OS-standard config directory:
//! - Windows: %APPDATA%\vibecheck\config.toml
//! - macOS: ~/Library/Application Support/vibecheck/config.toml
//! - Linux: ~/.config/vibecheck/config.toml
//!
//! Every field has a default, so a partial file (or none at all) works.
//! A path given on the command line must exist and parse; see [`load_from`].
//! Command-line flags and their environment variables override file values.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::enrichment::EnrichmentConfig;
use crate::enrichment::service::{
    DEFAULT_GENIUS_API_URL, DEFAULT_SPOTIFY_ACCOUNTS_URL, DEFAULT_SPOTIFY_API_URL,
};
use crate::recommend::DEFAULT_ML_SERVICE_URL;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials
    pub credentials: Credentials,

    /// HTTP listener settings
    pub server: ServerConfig,

    /// Upstream service locations
    pub services: ServicesConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Spotify app client ID (client-credentials grant)
    pub spotify_client_id: Option<String>,

    /// Spotify app client secret
    pub spotify_client_secret: Option<String>,

    /// Genius API client access token
    pub genius_access_token: Option<String>,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Upstream service locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Base URL of the ML recommendation service
    pub ml_service_url: String,

    /// Timeout for ML service calls. The hosted service sleeps when idle and
    /// can take most of a minute to wake.
    pub ml_timeout_secs: u64,

    /// Spotify client-credentials token endpoint
    pub spotify_accounts_url: String,

    /// Spotify Web API base URL
    pub spotify_api_url: String,

    /// Genius API base URL
    pub genius_api_url: String,

    /// Timeout for each Spotify/Genius call
    pub request_timeout_secs: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            ml_service_url: DEFAULT_ML_SERVICE_URL.to_string(),
            ml_timeout_secs: 60,
            spotify_accounts_url: DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string(),
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            genius_api_url: DEFAULT_GENIUS_API_URL.to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl ServicesConfig {
    pub fn ml_timeout(&self) -> Duration {
        Duration::from_secs(self.ml_timeout_secs)
    }
}

impl Config {
    /// Settings for the enrichment service
    pub fn enrichment(&self) -> EnrichmentConfig {
        EnrichmentConfig {
            spotify_client_id: self.credentials.spotify_client_id.clone(),
            spotify_client_secret: self.credentials.spotify_client_secret.clone(),
            genius_access_token: self.credentials.genius_access_token.clone(),
            spotify_accounts_url: self.services.spotify_accounts_url.clone(),
            spotify_api_url: self.services.spotify_api_url.clone(),
            genius_api_url: self.services.genius_api_url.clone(),
            request_timeout: Duration::from_secs(self.services.request_timeout_secs),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vibecheck"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Read and parse a config file
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Load configuration from the default location.
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_or_default(&path),
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    }
}

fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(path) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================
