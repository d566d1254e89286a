//! Genius API Data Transfer Objects
//!
//! Every Genius response wraps its payload as `{"meta": {...}, "response": {...}}`.
//! DO NOT use these types outside the genius module - convert to domain types.
//!
//! API Reference: https://docs.genius.com
//!
//! Example search response (trimmed):
//! ```json
//! {
//!   "meta": {"status": 200},
//!   "response": {
//!     "hits": [{
//!       "type": "song",
//!       "result": {
//!         "id": 378195,
//!         "title": "Song X",
//!         "url": "https://genius.com/Artist-y-song-x-lyrics",
//!         "primary_artist": {"id": 16775, "name": "Artist Y"}
//!       }
//!     }]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Meta {
    pub status: u16,
    pub message: Option<String>,
}

/// `GET /search?q=...`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub meta: Meta,
    pub response: SearchBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchBody {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// A ranked search hit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hit {
    #[serde(rename = "type")]
    pub hit_type: Option<String>,
    pub result: SongSummary,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongSummary {
    pub id: u64,
    pub url: String,
    pub title: Option<String>,
    pub primary_artist: Option<Artist>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: Option<u64>,
    pub name: String,
}

/// `GET /songs/{id}?text_format=plain`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongResponse {
    pub meta: Meta,
    pub response: SongBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongBody {
    pub song: Song,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Song {
    pub id: u64,
    pub url: String,
    pub description: Option<Description>,
}

/// Song description annotation; `plain` is only present with `text_format=plain`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Description {
    pub plain: Option<String>,
}

/// Error body (`{"meta": {"status": 401, "message": "..."}}`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub meta: Meta,
}
