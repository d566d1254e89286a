//! Enrichment service - aggregates track details from every provider
//!
//! One "open song detail" interaction runs three lookups concurrently:
//! 1. Track metadata (Spotify)
//! 2. Audio features (Spotify)
//! 3. Lyrics page and description (Genius)
//!
//! All three are awaited to completion. Failed lookups are logged and dropped;
//! the result always carries at least the caller's name and artist.

use std::sync::Arc;
use std::time::Duration;

use crate::enrichment::{
    domain::{
        AudioFeatures, EnrichmentError, EnrichmentResult, EnrichmentSource, LyricsInfo,
        TrackMetadata, TrackRef,
    },
    genius::GeniusClient,
    spotify::{ClientCredentials, SpotifyClient, TokenCache},
    traits::{AudioFeaturesApi, LyricsApi, MetadataApi},
};

pub const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_GENIUS_API_URL: &str = "https://api.genius.com";

/// Configuration for the enrichment service
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub genius_access_token: Option<String>,
    /// Client-credentials token endpoint
    pub spotify_accounts_url: String,
    pub spotify_api_url: String,
    pub genius_api_url: String,
    /// Per-request timeout for every outbound call
    pub request_timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            spotify_client_id: None,
            spotify_client_secret: None,
            genius_access_token: None,
            spotify_accounts_url: DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string(),
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            genius_api_url: DEFAULT_GENIUS_API_URL.to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// A lookup that did not contribute to the result
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub source: EnrichmentSource,
    pub error: EnrichmentError,
}

/// Merged result plus the reasons any source was left out
#[derive(Debug, Clone)]
pub struct EnrichmentReport {
    pub result: EnrichmentResult,
    pub failures: Vec<SourceFailure>,
}

/// Service for enriching tracks from external sources
#[derive(Clone)]
pub struct EnrichmentService {
    metadata: Arc<dyn MetadataApi>,
    features: Arc<dyn AudioFeaturesApi>,
    lyrics: Arc<dyn LyricsApi>,
}

impl EnrichmentService {
    /// Create a service backed by the real Spotify and Genius clients.
    ///
    /// Both Spotify lookups share one HTTP connection pool and one token cache.
    pub fn new(config: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(config.request_timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| EnrichmentError::Network(format!("failed to build HTTP client: {e}")))?;

        let credentials = ClientCredentials::new(
            http_client.clone(),
            &config.spotify_accounts_url,
            config.spotify_client_id.clone(),
            config.spotify_client_secret.clone(),
        );
        let tokens = Arc::new(TokenCache::new(Arc::new(credentials)));
        let spotify = Arc::new(SpotifyClient::new(
            http_client.clone(),
            &config.spotify_api_url,
            tokens,
        ));

        let genius = GeniusClient::new(
            http_client,
            &config.genius_api_url,
            config.genius_access_token.clone(),
        );
        if !genius.is_configured() {
            tracing::warn!("Genius access token is missing; lyrics lookups will be skipped");
        }

        Ok(Self::with_providers(spotify.clone(), spotify, Arc::new(genius)))
    }

    /// Create a service from arbitrary provider implementations
    pub fn with_providers(
        metadata: Arc<dyn MetadataApi>,
        features: Arc<dyn AudioFeaturesApi>,
        lyrics: Arc<dyn LyricsApi>,
    ) -> Self {
        Self {
            metadata,
            features,
            lyrics,
        }
    }

    /// Track metadata alone
    pub async fn track_metadata(&self, track_id: &str) -> Result<TrackMetadata, EnrichmentError> {
        self.metadata.track(track_id).await
    }

    /// Audio features alone
    pub async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, EnrichmentError> {
        self.features.audio_features(track_id).await
    }

    /// Lyrics-site info alone
    pub async fn lyrics_info(&self, song: &str, artist: &str) -> Result<LyricsInfo, EnrichmentError> {
        self.lyrics.lookup(song, artist).await
    }

    /// Fetch and merge everything known about a track.
    ///
    /// Never fails: sources that error are left out of the result.
    pub async fn fetch_enrichment(&self, track: &TrackRef) -> EnrichmentResult {
        self.fetch_enrichment_report(track).await.result
    }

    /// Like [`fetch_enrichment`](Self::fetch_enrichment), also reporting which
    /// sources failed and why.
    pub async fn fetch_enrichment_report(&self, track: &TrackRef) -> EnrichmentReport {
        // Wait for every branch; one failing must not cut the others short
        let (metadata, features, lyrics) = tokio::join!(
            self.metadata.track(&track.id),
            self.features.audio_features(&track.id),
            self.lyrics.lookup(&track.name, &track.artist),
        );

        let mut result = EnrichmentResult::fallback(track);
        let mut failures = Vec::new();

        // Merge order: metadata, then features, then lyrics
        match metadata {
            Ok(m) => result.merge_metadata(&m),
            Err(e) => failures.push(settle_failure(track, EnrichmentSource::SpotifyMetadata, e)),
        }
        match features {
            Ok(f) => result.merge_features(&f),
            Err(e) => failures.push(settle_failure(
                track,
                EnrichmentSource::SpotifyAudioFeatures,
                e,
            )),
        }
        match lyrics {
            Ok(l) => result.merge_lyrics(&l),
            Err(e) => failures.push(settle_failure(track, EnrichmentSource::Genius, e)),
        }

        tracing::debug!(
            track_id = %track.id,
            failed = failures.len(),
            "Enrichment finished"
        );

        EnrichmentReport { result, failures }
    }
}

fn settle_failure(track: &TrackRef, source: EnrichmentSource, error: EnrichmentError) -> SourceFailure {
    match &error {
        // Zero search hits is an expected outcome, not worth a warning
        EnrichmentError::NoMatches => {
            tracing::debug!(track_id = %track.id, %source, "No match");
        }
        e if e.is_auth() => {
            tracing::error!(%source, "Enrichment source misconfigured: {}", e);
        }
        _ => {
            tracing::warn!(track_id = %track.id, %source, "Enrichment source failed: {}", error);
        }
    }
    SourceFailure { source, error }
}
