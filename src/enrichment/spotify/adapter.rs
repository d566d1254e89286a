//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! This is the ONLY place where Spotify DTO types are converted to domain types.

use super::dto;
use crate::enrichment::domain::{AudioFeatures, EnrichmentError, TrackMetadata};

/// Artist name reported when a track carries no artist credits
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Convert a track response to domain metadata
pub fn to_metadata(track: dto::Track) -> TrackMetadata {
    let album_art = track.album.images.into_iter().next().map(|image| image.url);
    let artist_name = track
        .artists
        .into_iter()
        .next()
        .map(|artist| artist.name)
        .or_else(|| Some(UNKNOWN_ARTIST.to_string()));

    TrackMetadata {
        name: track.name,
        album_name: Some(track.album.name),
        release_date: track.album.release_date.filter(|d| !d.is_empty()),
        album_art,
        artist_name,
    }
}

/// Convert an audio-features response to domain features
///
/// Every scalar must lie in [0, 1]; anything else means the response is not
/// the shape we expect and the whole source is treated as unavailable.
pub fn to_features(features: dto::AudioFeatures) -> Result<AudioFeatures, EnrichmentError> {
    let scalars = [
        ("danceability", features.danceability),
        ("energy", features.energy),
        ("valence", features.valence),
        ("acousticness", features.acousticness),
        ("instrumentalness", features.instrumentalness),
    ];

    for (name, value) in scalars {
        if let Some(v) = value
            && !(0.0..=1.0).contains(&v)
        {
            return Err(EnrichmentError::InvalidResponse(format!(
                "{name} out of range: {v}"
            )));
        }
    }

    Ok(AudioFeatures {
        danceability: features.danceability,
        energy: features.energy,
        valence: features.valence,
        acousticness: features.acousticness,
        instrumentalness: features.instrumentalness,
    })
}
