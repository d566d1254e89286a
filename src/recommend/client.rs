//! HTTP client for the ML recommendation service

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::request::{MoodRequest, SongRequest};

pub const DEFAULT_ML_SERVICE_URL: &str = "https://rs-mini-project-1.onrender.com";

/// Recommendation endpoints on the ML service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Song,
    Mood,
}

impl Upstream {
    fn path(self) -> &'static str {
        match self {
            Self::Song => "recommend-song",
            Self::Mood => "recommend-mood",
        }
    }
}

/// Errors from forwarding a request to the ML service
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The ML service answered with a non-success status. `body` is its JSON
    /// body, or `{"error": <text>}` when the body was not JSON.
    #[error("ML service returned HTTP {status}")]
    Upstream { status: u16, body: Value },

    #[error("Error communicating with ML service: {0}")]
    Unreachable(String),

    #[error("Invalid response from ML service: {0}")]
    InvalidResponse(String),

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

/// Something that can answer recommendation requests.
///
/// Implement this trait to substitute the ML service in tests.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn forward(&self, upstream: Upstream, body: &Value) -> Result<Value, ProxyError>;
}

/// ML service client
#[derive(Clone)]
pub struct RecommenderClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl RecommenderClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProxyError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::Unreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Forward a JSON body verbatim and return the JSON answer verbatim
    pub async fn forward(&self, upstream: Upstream, body: &Value) -> Result<Value, ProxyError> {
        let url = format!("{}/{}", self.base_url, upstream.path());

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(%url, "Error communicating with ML service: {}", e);
                ProxyError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProxyError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(%url, %status, "ML service rejected request");
            let body: Value = serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::json!({ "error": text }));
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&text).map_err(|e| ProxyError::InvalidResponse(e.to_string()))
    }

    /// Forward a typed song request
    pub async fn recommend_song(&self, request: &SongRequest) -> Result<Value, ProxyError> {
        self.forward(Upstream::Song, &encode(request)?).await
    }

    pub async fn recommend_mood(&self, request: &MoodRequest) -> Result<Value, ProxyError> {
        self.forward(Upstream::Mood, &encode(request)?).await
    }
}

#[async_trait]
impl Recommender for RecommenderClient {
    async fn forward(&self, upstream: Upstream, body: &Value) -> Result<Value, ProxyError> {
        self.forward(upstream, body).await
    }
}

fn encode<T: Serialize>(request: &T) -> Result<Value, ProxyError> {
    serde_json::to_value(request).map_err(|e| ProxyError::Encode(e.to_string()))
}
