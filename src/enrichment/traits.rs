//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use vibecheck::enrichment::traits::MetadataApi;
//!
//! // In production code:
//! async fn album_of<T: MetadataApi>(client: &T, id: &str) -> Option<String> {
//!     client.track(id).await.ok()?.album_name
//! }
//!
//! // In tests:
//! struct MockMetadata { ... }
//! impl MetadataApi for MockMetadata { ... }
//! ```

use async_trait::async_trait;

use super::domain::{AudioFeatures, EnrichmentError, LyricsInfo, TrackMetadata};

/// Trait for track metadata lookup by Spotify track ID.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    async fn track(&self, track_id: &str) -> Result<TrackMetadata, EnrichmentError>;
}

/// Trait for audio-feature lookup by Spotify track ID.
#[async_trait]
pub trait AudioFeaturesApi: Send + Sync {
    async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, EnrichmentError>;
}

/// Trait for lyrics-site lookup by free-text song and artist.
#[async_trait]
pub trait LyricsApi: Send + Sync {
    async fn lookup(&self, song: &str, artist: &str) -> Result<LyricsInfo, EnrichmentError>;
}

// Implement traits for real clients

#[async_trait]
impl MetadataApi for super::spotify::SpotifyClient {
    async fn track(&self, track_id: &str) -> Result<TrackMetadata, EnrichmentError> {
        self.track(track_id).await
    }
}

#[async_trait]
impl AudioFeaturesApi for super::spotify::SpotifyClient {
    async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, EnrichmentError> {
        self.audio_features(track_id).await
    }
}

#[async_trait]
impl LyricsApi for super::genius::GeniusClient {
    async fn lookup(&self, song: &str, artist: &str) -> Result<LyricsInfo, EnrichmentError> {
        self.lookup(song, artist).await
    }
}
