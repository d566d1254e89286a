//! HTTP error responses.
//!
//! Every failure leaves the API as a status code plus a `{"error": ...}` JSON
//! body, except ML service errors, whose body is relayed unchanged.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::enrichment::EnrichmentError;
use crate::recommend::ProxyError;

/// Which single-source route failed, for the error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    SpotifyMetadata,
    AudioFeatures,
    Genius,
}

impl Lookup {
    fn failure_message(self) -> &'static str {
        match self {
            Self::SpotifyMetadata => "Failed to fetch Spotify metadata",
            Self::AudioFeatures => "Failed to fetch audio features",
            Self::Genius => "Failed to fetch Genius info",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Self::SpotifyMetadata | Self::AudioFeatures => "Track not found on Spotify",
            Self::Genius => "Song not found on Genius",
        }
    }
}

/// Errors returned by route handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Required input absent; no outbound call was made
    #[error("{0}")]
    MissingInput(&'static str),

    /// Request body was not valid JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Query string did not decode, e.g. a repeated parameter
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("{lookup:?} lookup failed: {error}")]
    Lookup {
        lookup: Lookup,
        error: EnrichmentError,
    },

    #[error(transparent)]
    Proxy(#[from] ProxyError),
}

impl ApiError {
    pub fn lookup(lookup: Lookup) -> impl FnOnce(EnrichmentError) -> Self {
        move |error| Self::Lookup { lookup, error }
    }

    /// Status code and JSON body for this error
    pub fn status_and_body(&self) -> (StatusCode, serde_json::Value) {
        match self {
            Self::MissingInput(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            Self::InvalidBody(_) | Self::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            Self::Lookup { lookup, error } => lookup_status_and_body(*lookup, error),
            Self::Proxy(ProxyError::Upstream { status, body }) => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                body.clone(),
            ),
            Self::Proxy(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Error communicating with ML service." }),
            ),
        }
    }
}

fn lookup_status_and_body(lookup: Lookup, error: &EnrichmentError) -> (StatusCode, serde_json::Value) {
    let (status, message) = match error {
        EnrichmentError::NotConfigured { provider } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{provider} API key not configured on server."),
        ),
        EnrichmentError::Auth { provider, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to authorize with {provider}. Check server credentials."),
        ),
        EnrichmentError::NoMatches => (StatusCode::NOT_FOUND, lookup.not_found_message().to_string()),
        _ => {
            let status = error
                .upstream_status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, lookup.failure_message().to_string())
        }
    };
    (status, json!({ "error": message }))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(%status, "{}", self);
        } else {
            tracing::debug!(%status, "{}", self);
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_bad_request() {
        let (status, body) = ApiError::MissingInput("Track ID is required").status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Track ID is required" }));
    }

    #[test]
    fn test_upstream_status_propagates() {
        let error = ApiError::lookup(Lookup::SpotifyMetadata)(EnrichmentError::Upstream {
            status: 404,
            message: "Non existing id".to_string(),
        });
        let (status, body) = error.status_and_body();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Failed to fetch Spotify metadata" }));
    }

    #[test]
    fn test_network_error_is_server_error() {
        let error = ApiError::lookup(Lookup::AudioFeatures)(EnrichmentError::Network("reset".to_string()));
        assert_eq!(error.status_and_body().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_error_is_distinct_from_lookup_error() {
        let auth = ApiError::lookup(Lookup::SpotifyMetadata)(EnrichmentError::Auth {
            provider: "Spotify",
            message: "invalid_client".to_string(),
        });
        let lookup = ApiError::lookup(Lookup::SpotifyMetadata)(EnrichmentError::Parse("eof".to_string()));

        assert_ne!(auth.status_and_body().1, lookup.status_and_body().1);
    }

    #[test]
    fn test_genius_not_configured_message() {
        let error = ApiError::lookup(Lookup::Genius)(EnrichmentError::NotConfigured { provider: "Genius" });
        let (status, body) = error.status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Genius API key not configured on server." }));
    }

    #[test]
    fn test_genius_no_match_is_not_found() {
        let error = ApiError::lookup(Lookup::Genius)(EnrichmentError::NoMatches);
        let (status, body) = error.status_and_body();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Song not found on Genius" }));
    }

    #[test]
    fn test_proxy_upstream_relayed_verbatim() {
        let body = json!({ "error": "Song 'x' by 'y' not found." });
        let error = ApiError::from(ProxyError::Upstream { status: 404, body: body.clone() });
        assert_eq!(error.status_and_body(), (StatusCode::NOT_FOUND, body));
    }

    #[test]
    fn test_proxy_unreachable() {
        let error = ApiError::from(ProxyError::Unreachable("refused".to_string()));
        assert_eq!(
            error.status_and_body(),
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Error communicating with ML service." })
            )
        );
    }
}
