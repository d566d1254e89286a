//! Spotify Web API Data Transfer Objects
//!
//! These types match what the Spotify accounts service and Web API return.
//! Only the fields we read are declared; serde ignores the rest.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api
//!
//! Example track response (trimmed):
//! ```json
//! {
//!   "id": "abc123",
//!   "name": "Song X",
//!   "album": {
//!     "name": "Z",
//!     "release_date": "1999-01-01",
//!     "images": [{"url": "https://i.scdn.co/image/640", "width": 640, "height": 640}]
//!   },
//!   "artists": [{"id": "art1", "name": "Artist Y"}]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Client-credentials grant response from the accounts service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    /// Lifetime of the token in seconds
    pub expires_in: u64,
}

/// Error body returned by the accounts service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthError {
    pub error: String,
    pub error_description: Option<String>,
}

/// Error body returned by the Web API (`{"error": {"status": 404, "message": "..."}}`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

/// `GET /v1/tracks/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub album: Album,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Album {
    pub name: String,
    pub release_date: Option<String>,
    /// Images, widest first
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: Option<String>,
    pub name: String,
}

/// `GET /v1/audio-features/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioFeatures {
    pub id: Option<String>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub valence: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// ============================================================================
