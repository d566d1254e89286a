//! Track enrichment - fetches metadata for a recommended track from external services.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`spotify/dto.rs`, `genius/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Token cache** (`spotify/token.rs`) - Client-credentials token lifecycle
//! - **Service** - Concurrent fan-out and merge of all sources
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{EnrichmentService, EnrichmentConfig, TrackRef};
//!
//! let config = EnrichmentConfig {
//!     spotify_client_id: Some("id".to_string()),
//!     spotify_client_secret: Some("secret".to_string()),
//!     ..Default::default()
//! };
//! let service = EnrichmentService::new(&config)?;
//!
//! let result = service
//!     .fetch_enrichment(&TrackRef::new("abc123", "Song X", "Artist Y"))
//!     .await;
//! println!("Album: {:?}", result.album_name);
//! ```

pub mod domain;
pub mod genius;
pub mod service;
pub mod spotify;
pub mod traits;

pub use domain::{
    AudioFeatures, EnrichmentError, EnrichmentResult, EnrichmentSource, LyricsInfo,
    TrackMetadata, TrackRef,
};
pub use service::{EnrichmentConfig, EnrichmentReport, EnrichmentService, SourceFailure};
