//! Spotify Web API HTTP client
//!
//! Every request carries a bearer token from the shared [`TokenCache`]. A
//! token the API rejects with 401 is discarded so the next lookup renews it.
//! See: https://developer.spotify.com/documentation/web-api

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::token::TokenCache;
use super::{adapter, dto};
use crate::enrichment::domain::{AudioFeatures, EnrichmentError, TrackMetadata};

/// Spotify Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenCache>,
}

impl SpotifyClient {
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        tokens: Arc<TokenCache>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Look up track metadata by Spotify track ID
    pub async fn track(&self, track_id: &str) -> Result<TrackMetadata, EnrichmentError> {
        let track: dto::Track = self
            .get_json(&format!("tracks/{}", urlencoding::encode(track_id)))
            .await?;
        Ok(adapter::to_metadata(track))
    }

    /// Look up audio features by Spotify track ID
    pub async fn audio_features(&self, track_id: &str) -> Result<AudioFeatures, EnrichmentError> {
        let features: dto::AudioFeatures = self
            .get_json(&format!("audio-features/{}", urlencoding::encode(track_id)))
            .await?;
        adapter::to_features(features)
    }

    /// Send an authorized GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, EnrichmentError> {
        let token = self.tokens.get_valid_token().await?;
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.tokens.invalidate(&token).await;
        }

        if !status.is_success() {
            let message = match response.json::<dto::ApiErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => status.canonical_reason().unwrap_or("Unknown").to_string(),
            };
            return Err(EnrichmentError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| EnrichmentError::Parse(e.to_string()))
    }
}
