//! Internal domain models for track enrichment.
//!
//! These types are OUR types - they don't change when Spotify or Genius change
//! their APIs. All external responses get converted into these types via adapters.

use serde::Serialize;

/// Track reference supplied by the caller (usually a recommendation row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRef {
    /// Spotify track ID
    pub id: String,
    /// Display name of the song
    pub name: String,
    /// Display name of the artist
    pub artist: String,
}

impl TrackRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
        }
    }
}

/// Track metadata from the Spotify tracks endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetadata {
    /// Track title as Spotify has it
    pub name: String,
    /// Album title
    pub album_name: Option<String>,
    /// Release date, in whatever precision Spotify reports ("1999", "1999-01-01")
    pub release_date: Option<String>,
    /// URL of the largest album image
    pub album_art: Option<String>,
    /// First credited artist
    pub artist_name: Option<String>,
}

/// Audio feature scalars, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AudioFeatures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danceability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acousticness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrumentalness: Option<f64>,
}

/// Lyrics-site information for a song
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsInfo {
    /// Genius song page
    pub genius_url: String,
    /// Plain-text song description, when Genius has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Merged, possibly partial record describing a track.
///
/// `name` and `artist` always hold the caller-supplied values; every other
/// field is present only when its source lookup succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResult {
    pub name: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
    #[serde(flatten)]
    pub features: AudioFeatures,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genius_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnrichmentResult {
    /// The bare result every enrichment starts from.
    pub fn fallback(track: &TrackRef) -> Self {
        Self {
            name: track.name.clone(),
            artist: track.artist.clone(),
            album_name: None,
            release_date: None,
            album_art: None,
            features: AudioFeatures::default(),
            genius_url: None,
            description: None,
        }
    }

    /// Merge track metadata, preferring values already present
    pub fn merge_metadata(&mut self, metadata: &TrackMetadata) {
        if self.album_name.is_none() {
            self.album_name = metadata.album_name.clone();
        }
        if self.release_date.is_none() {
            self.release_date = metadata.release_date.clone();
        }
        if self.album_art.is_none() {
            self.album_art = metadata.album_art.clone();
        }
    }

    /// Merge audio features, preferring values already present
    pub fn merge_features(&mut self, features: &AudioFeatures) {
        let own = &mut self.features;
        if own.danceability.is_none() {
            own.danceability = features.danceability;
        }
        if own.energy.is_none() {
            own.energy = features.energy;
        }
        if own.valence.is_none() {
            own.valence = features.valence;
        }
        if own.acousticness.is_none() {
            own.acousticness = features.acousticness;
        }
        if own.instrumentalness.is_none() {
            own.instrumentalness = features.instrumentalness;
        }
    }

    /// Merge lyrics-site info, preferring values already present
    pub fn merge_lyrics(&mut self, lyrics: &LyricsInfo) {
        if self.genius_url.is_none() {
            self.genius_url = Some(lyrics.genius_url.clone());
        }
        if self.description.is_none() {
            self.description = lyrics.description.clone();
        }
    }
}

/// Source of enrichment data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentSource {
    SpotifyMetadata,
    SpotifyAudioFeatures,
    Genius,
}

impl std::fmt::Display for EnrichmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SpotifyMetadata => "spotify metadata",
            Self::SpotifyAudioFeatures => "spotify audio features",
            Self::Genius => "genius",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during enrichment
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("{provider} credentials are not configured")]
    NotConfigured { provider: &'static str },

    #[error("Authorization with {provider} failed: {message}")]
    Auth { provider: &'static str, message: String },

    #[error("Upstream returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No matches found")]
    NoMatches,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl EnrichmentError {
    /// HTTP status reported by the upstream, when there was one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::RateLimited => Some(429),
            _ => None,
        }
    }

    /// Whether this is a credential/configuration failure rather than a lookup failure
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::NotConfigured { .. } | Self::Auth { .. })
    }
}
