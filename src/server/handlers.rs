//! Route handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::Value;

use super::AppState;
use super::error::{ApiError, Lookup};
use crate::enrichment::{AudioFeatures, EnrichmentResult, LyricsInfo, TrackMetadata, TrackRef};
use crate::recommend::Upstream;

#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    #[serde(rename = "trackId")]
    pub track_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SongQuery {
    pub song: Option<String>,
    pub artist: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    #[serde(rename = "trackId")]
    pub track_id: Option<String>,
    pub song: Option<String>,
    pub artist: Option<String>,
}

/// Treat absent and blank parameters alike
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))
}

/// `POST /api/recommend-song`
pub async fn recommend_song(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(body)?;
    Ok(Json(state.recommender.forward(Upstream::Song, &body).await?))
}

/// `POST /api/recommend-mood`
pub async fn recommend_mood(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = json_body(body)?;
    Ok(Json(state.recommender.forward(Upstream::Mood, &body).await?))
}

/// `GET /api/spotify-metadata?trackId=ID`
pub async fn spotify_metadata(
    State(state): State<AppState>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Result<Json<TrackMetadata>, ApiError> {
    let query = query_params(query)?;
    let track_id = present(query.track_id).ok_or(ApiError::MissingInput("Track ID is required"))?;
    let metadata = state
        .enrichment
        .track_metadata(&track_id)
        .await
        .map_err(ApiError::lookup(Lookup::SpotifyMetadata))?;
    Ok(Json(metadata))
}

/// `GET /api/audio-features?trackId=ID`
pub async fn audio_features(
    State(state): State<AppState>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Result<Json<AudioFeatures>, ApiError> {
    let query = query_params(query)?;
    let track_id = present(query.track_id).ok_or(ApiError::MissingInput("Track ID is required"))?;
    let features = state
        .enrichment
        .audio_features(&track_id)
        .await
        .map_err(ApiError::lookup(Lookup::AudioFeatures))?;
    Ok(Json(features))
}

/// `GET /api/genius-info?song=S&artist=A`
pub async fn genius_info(
    State(state): State<AppState>,
    query: Result<Query<SongQuery>, QueryRejection>,
) -> Result<Json<LyricsInfo>, ApiError> {
    let query = query_params(query)?;
    let (Some(song), Some(artist)) = (present(query.song), present(query.artist)) else {
        return Err(ApiError::MissingInput("Song and artist are required"));
    };
    let info = state
        .enrichment
        .lyrics_info(&song, &artist)
        .await
        .map_err(ApiError::lookup(Lookup::Genius))?;
    Ok(Json(info))
}

/// `GET /api/track-details?trackId=ID&song=S&artist=A`
///
/// Always answers 200 once the inputs are present; failed sources are omitted.
pub async fn track_details(
    State(state): State<AppState>,
    query: Result<Query<DetailsQuery>, QueryRejection>,
) -> Result<Json<EnrichmentResult>, ApiError> {
    let query = query_params(query)?;
    let (Some(id), Some(song), Some(artist)) =
        (present(query.track_id), present(query.song), present(query.artist))
    else {
        return Err(ApiError::MissingInput("Track ID, song and artist are required"));
    };
    let track = TrackRef::new(id, song, artist);
    Ok(Json(state.enrichment.fetch_enrichment(&track).await))
}
