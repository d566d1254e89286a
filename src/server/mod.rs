//! HTTP API consumed by the browser frontend.
//!
//! | Route                      | Purpose                                  |
//! |----------------------------|------------------------------------------|
//! | `POST /api/recommend-song` | Proxy to the ML service                  |
//! | `POST /api/recommend-mood` | Proxy to the ML service                  |
//! | `GET /api/spotify-metadata`| Track metadata for `trackId`             |
//! | `GET /api/audio-features`  | Audio features for `trackId`             |
//! | `GET /api/genius-info`     | Genius page for `song` + `artist`        |
//! | `GET /api/track-details`   | All of the above sources merged          |

mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::enrichment::EnrichmentService;
use crate::error::{Result, ResultExt};
use crate::recommend::{Recommender, RecommenderClient};

pub use error::{ApiError, Lookup};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub enrichment: EnrichmentService,
    pub recommender: Arc<dyn Recommender>,
}

impl AppState {
    /// Real Spotify, Genius and ML service clients built from `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let enrichment = EnrichmentService::new(&config.enrichment())?;
        let recommender = RecommenderClient::new(
            config.services.ml_service_url.clone(),
            config.services.ml_timeout(),
        )?;
        Ok(Self {
            enrichment,
            recommender: Arc::new(recommender),
        })
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/recommend-song", post(handlers::recommend_song))
        .route("/api/recommend-mood", post(handlers::recommend_mood))
        .route("/api/spotify-metadata", get(handlers::spotify_metadata))
        .route("/api/audio-features", get(handlers::audio_features))
        .route("/api/genius-info", get(handlers::genius_info))
        .route("/api/track-details", get(handlers::track_details))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(format!("binding {addr}"))?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::traits::mocks::{MockFeatures, MockLyrics, MockMetadata};
    use crate::enrichment::{AudioFeatures, EnrichmentError};
    use crate::recommend::{ProxyError, Upstream};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Records forwarded bodies and answers with a fixed outcome
    struct MockRecommender {
        seen: Mutex<Vec<(Upstream, Value)>>,
        answer: fn() -> std::result::Result<Value, ProxyError>,
    }

    #[async_trait]
    impl Recommender for MockRecommender {
        async fn forward(
            &self,
            upstream: Upstream,
            body: &Value,
        ) -> std::result::Result<Value, ProxyError> {
            self.seen.lock().unwrap().push((upstream, body.clone()));
            (self.answer)()
        }
    }

    fn recommender(
        answer: fn() -> std::result::Result<Value, ProxyError>,
    ) -> Arc<MockRecommender> {
        Arc::new(MockRecommender {
            seen: Mutex::new(Vec::new()),
            answer,
        })
    }

    fn ranked_list() -> std::result::Result<Value, ProxyError> {
        Ok(json!([{ "name": "Lithium", "artist": "Nirvana", "spotify_id": "x1", "similarity_score": 0.93 }]))
    }

    fn state_with(
        metadata: MockMetadata,
        lyrics: MockLyrics,
        recommender: Arc<MockRecommender>,
    ) -> (AppState, Arc<MockMetadata>) {
        let metadata = Arc::new(metadata);
        let enrichment = EnrichmentService::with_providers(
            metadata.clone(),
            Arc::new(MockFeatures::with_features(AudioFeatures {
                energy: Some(0.8),
                ..Default::default()
            })),
            Arc::new(lyrics),
        );
        (
            AppState {
                enrichment,
                recommender,
            },
            metadata,
        )
    }

    fn default_state() -> (AppState, Arc<MockMetadata>) {
        state_with(
            MockMetadata::with_album("Z", "1999-01-01"),
            MockLyrics::no_matches(),
            recommender(ranked_list),
        )
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_state_from_default_config() {
        assert!(AppState::from_config(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_missing_track_id_is_rejected_without_lookup() {
        let (state, metadata) = default_state();

        let (status, body) = send(state.clone(), get("/api/spotify-metadata")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Track ID is required" }));

        let (status, _) = send(state, get("/api/spotify-metadata?trackId=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(metadata.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_query_gets_json_error() {
        let (state, metadata) = default_state();

        let (status, body) = send(
            state.clone(),
            get("/api/spotify-metadata?trackId=a&trackId=b"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query string"));

        let (status, body) = send(state, get("/api/genius-info?song=a&song=b&artist=c")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(metadata.calls(), 0);
    }

    #[tokio::test]
    async fn test_spotify_metadata_shape() {
        let (state, _) = default_state();

        let (status, body) = send(state, get("/api/spotify-metadata?trackId=abc123")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "name": "Mock Track",
                "albumName": "Z",
                "releaseDate": "1999-01-01",
                "albumArt": null,
                "artistName": "Mock Artist"
            })
        );
    }

    #[tokio::test]
    async fn test_spotify_metadata_upstream_status() {
        let (state, _) = state_with(
            MockMetadata::with_error(EnrichmentError::Upstream {
                status: 404,
                message: "Non existing id".to_string(),
            }),
            MockLyrics::no_matches(),
            recommender(ranked_list),
        );

        let (status, body) = send(state, get("/api/spotify-metadata?trackId=nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_audio_features() {
        let (state, _) = default_state();

        let (status, body) = send(state, get("/api/audio-features?trackId=abc123")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "energy": 0.8 }));
    }

    #[tokio::test]
    async fn test_genius_info_requires_both_params() {
        let (state, _) = default_state();

        let (status, body) = send(state, get("/api/genius-info?song=Song%20X")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Song and artist are required" }));
    }

    #[tokio::test]
    async fn test_genius_info_found() {
        let (state, _) = state_with(
            MockMetadata::with_album("Z", "1999-01-01"),
            MockLyrics::with_page("https://genius.com/x", Some("About the song")),
            recommender(ranked_list),
        );

        let (status, body) = send(state, get("/api/genius-info?song=Song%20X&artist=Artist%20Y")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "geniusUrl": "https://genius.com/x", "description": "About the song" })
        );
    }

    #[tokio::test]
    async fn test_genius_info_no_hits() {
        let (state, _) = default_state();

        let (status, body) = send(state, get("/api/genius-info?song=Song%20X&artist=Artist%20Y")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Song not found on Genius" }));
    }

    #[tokio::test]
    async fn test_track_details_merges_sources() {
        let (state, _) = default_state();

        let (status, body) = send(
            state,
            get("/api/track-details?trackId=abc123&song=Song%20X&artist=Artist%20Y"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "name": "Song X",
                "artist": "Artist Y",
                "albumName": "Z",
                "releaseDate": "1999-01-01",
                "energy": 0.8
            })
        );
    }

    #[tokio::test]
    async fn test_track_details_survives_total_failure() {
        let (state, _) = state_with(
            MockMetadata::with_error(EnrichmentError::Network("reset".to_string())),
            MockLyrics::with_error(EnrichmentError::NotConfigured { provider: "Genius" }),
            recommender(ranked_list),
        );

        let (status, body) = send(
            state,
            get("/api/track-details?trackId=abc123&song=Song%20X&artist=Artist%20Y"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Song X");
        assert!(body.get("albumName").is_none());
    }

    #[tokio::test]
    async fn test_recommend_song_forwards_body_verbatim() {
        let mock = recommender(ranked_list);
        let (state, _) = state_with(
            MockMetadata::with_album("Z", "1999-01-01"),
            MockLyrics::no_matches(),
            mock.clone(),
        );
        let request = json!({ "song_name": "Smells Like Teen Spirit", "artist_name": "Nirvana", "num_recommendations": 24 });

        let (status, body) = send(state, post_json("/api/recommend-song", request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ranked_list().unwrap());

        let seen = mock.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[(Upstream::Song, request)]);
    }

    #[tokio::test]
    async fn test_recommend_mood_relays_upstream_error() {
        let (state, _) = state_with(
            MockMetadata::with_album("Z", "1999-01-01"),
            MockLyrics::no_matches(),
            recommender(|| {
                Err(ProxyError::Upstream {
                    status: 400,
                    body: json!({ "error": "Invalid or missing mood." }),
                })
            }),
        );

        let (status, body) = send(state, post_json("/api/recommend-mood", json!({ "mood": "grumpy" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid or missing mood." }));
    }

    #[tokio::test]
    async fn test_recommend_ml_service_down() {
        let (state, _) = state_with(
            MockMetadata::with_album("Z", "1999-01-01"),
            MockLyrics::no_matches(),
            recommender(|| Err(ProxyError::Unreachable("connection refused".to_string()))),
        );

        let (status, body) = send(state, post_json("/api/recommend-song", json!({}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error communicating with ML service." }));
    }

    #[tokio::test]
    async fn test_recommend_rejects_malformed_json() {
        let (state, _) = default_state();
        let request = Request::post("/api/recommend-song")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
    }
}
