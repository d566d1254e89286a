//! Genius HTTP client
//!
//! Searches Genius for "song artist", takes the top hit and fetches its detail
//! record for the page URL and plain-text description.
//! See: https://docs.genius.com

use serde::de::DeserializeOwned;

use super::{adapter, dto};
use crate::enrichment::domain::{EnrichmentError, LyricsInfo};

const PROVIDER: &str = "Genius";

/// Genius API client
pub struct GeniusClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl GeniusClient {
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.filter(|t| !t.is_empty()),
        }
    }

    /// Whether an access token was configured
    pub fn is_configured(&self) -> bool {
        self.access_token.is_some()
    }

    /// Find the Genius page for a song.
    ///
    /// Returns [`EnrichmentError::NoMatches`] when the search has no hits.
    pub async fn lookup(&self, song: &str, artist: &str) -> Result<LyricsInfo, EnrichmentError> {
        let query = format!("{} {}", song, artist);
        let search: dto::SearchResponse = self
            .get_json(&format!("search?q={}", urlencoding::encode(&query)))
            .await?;

        let Some(hit) = adapter::best_hit(search) else {
            return Err(EnrichmentError::NoMatches);
        };
        tracing::debug!(song_id = hit.id, url = %hit.url, "Genius search hit");

        let detail: dto::SongResponse = self
            .get_json(&format!("songs/{}?text_format=plain", hit.id))
            .await?;
        Ok(adapter::to_lyrics_info(detail))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, EnrichmentError> {
        let Some(token) = &self.access_token else {
            return Err(EnrichmentError::NotConfigured { provider: PROVIDER });
        };
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(EnrichmentError::Auth {
                provider: PROVIDER,
                message: "access token rejected".to_string(),
            });
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnrichmentError::RateLimited);
        }

        if !status.is_success() {
            let message = match response.json::<dto::ErrorResponse>().await {
                Ok(body) => body.meta.message.unwrap_or_default(),
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
