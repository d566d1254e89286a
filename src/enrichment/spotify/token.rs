//! Spotify access token cache
//!
//! Holds the bearer credential from a client-credentials grant and renews it
//! transparently. A credential is considered expired [`SAFETY_MARGIN`] before
//! the lifetime Spotify reported, so callers never send a token that is about
//! to lapse mid-request.
//!
//! The check and the renewal happen under one async mutex: concurrent callers
//! that find the credential expired wait for a single renewal instead of each
//! exchanging credentials.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::dto;
use crate::enrichment::domain::EnrichmentError;

/// Renew this long before the reported expiry
pub const SAFETY_MARGIN: Duration = Duration::from_secs(300);

/// Longest lifetime we accept from the server; longer ones are clamped
pub const MAX_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

const PROVIDER: &str = "Spotify";

/// Token issued by an authorization server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime reported by the server
    pub expires_in: Duration,
}

/// Something that can exchange credentials for a bearer token.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn request_token(&self) -> Result<IssuedToken, EnrichmentError>;
}

/// Cached bearer credential
#[derive(Debug, Clone)]
pub struct Credential {
    value: String,
    expires_at: Instant,
}

impl Credential {
    /// Build a credential issued at `issued_at` with lifetime `ttl`.
    ///
    /// Lifetimes shorter than the safety margin yield an already-expired
    /// credential. Lifetimes over [`MAX_LIFETIME`] count as `MAX_LIFETIME`.
    pub fn issued(value: impl Into<String>, issued_at: Instant, ttl: Duration) -> Self {
        let lifetime = ttl.min(MAX_LIFETIME).saturating_sub(SAFETY_MARGIN);
        Self {
            value: value.into(),
            expires_at: issued_at.checked_add(lifetime).unwrap_or(issued_at),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// A credential is usable strictly before its expiry instant
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Process-wide token cache shared by every Spotify lookup
pub struct TokenCache {
    source: Arc<dyn TokenSource>,
    credential: Mutex<Option<Credential>>,
}

impl TokenCache {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            credential: Mutex::new(None),
        }
    }

    /// Return a token that is valid right now, renewing it first if needed.
    ///
    /// Renewal failures propagate; the held credential is left untouched.
    pub async fn get_valid_token(&self) -> Result<String, EnrichmentError> {
        let mut held = self.credential.lock().await;

        if let Some(credential) = held.as_ref()
            && credential.is_valid_at(Instant::now())
        {
            return Ok(credential.value.clone());
        }

        let issued = self.source.request_token().await?;
        if issued.expires_in > MAX_LIFETIME {
            tracing::warn!(
                expires_in_secs = issued.expires_in.as_secs(),
                "Spotify token lifetime out of range, clamping"
            );
        }
        let credential = Credential::issued(issued.access_token, Instant::now(), issued.expires_in);
        tracing::info!(
            expires_in_secs = issued.expires_in.as_secs(),
            "New Spotify token fetched"
        );

        let value = credential.value.clone();
        *held = Some(credential);
        Ok(value)
    }

    /// Drop the held credential if it is still `rejected`, so the next call
    /// renews. A credential renewed meanwhile by another caller is kept.
    pub async fn invalidate(&self, rejected: &str) {
        let mut held = self.credential.lock().await;
        if held.as_ref().is_some_and(|c| c.value() == rejected) {
            tracing::info!("Spotify token rejected, discarding");
            *held = None;
        }
    }

    #[cfg(test)]
    async fn expires_at(&self) -> Option<Instant> {
        self.credential.lock().await.as_ref().map(|c| c.expires_at)
    }
}

/// Client-credentials grant against the Spotify accounts service
pub struct ClientCredentials {
    http_client: reqwest::Client,
    token_url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl ClientCredentials {
    pub fn new(
        http_client: reqwest::Client,
        token_url: impl Into<String>,
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            http_client,
            token_url: token_url.into(),
            client_id: client_id.filter(|s| !s.is_empty()),
            client_secret: client_secret.filter(|s| !s.is_empty()),
        }
    }
}

/// `Authorization` header value for HTTP Basic auth
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD
        .encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

#[async_trait]
impl TokenSource for ClientCredentials {
    async fn request_token(&self) -> Result<IssuedToken, EnrichmentError> {
        let (Some(id), Some(secret)) = (&self.client_id, &self.client_secret) else {
            return Err(EnrichmentError::NotConfigured { provider: PROVIDER });
        };

        let response = self
            .http_client
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, basic_auth_header(id, secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| auth_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<dto::AuthError>().await {
                Ok(error) => error.error_description.unwrap_or(error.error),
                Err(_) => status.canonical_reason().unwrap_or("Unknown").to_string(),
            };
            tracing::error!(%status, %message, "Error fetching Spotify token");
            return Err(auth_error(format!("HTTP {status}: {message}")));
        }

        let token = response
            .json::<dto::TokenResponse>()
            .await
            .map_err(|e| auth_error(format!("unexpected token response: {e}")))?;

        Ok(IssuedToken {
            access_token: token.access_token,
            expires_in: Duration::from_secs(token.expires_in),
        })
    }
}

fn auth_error(message: String) -> EnrichmentError {
    EnrichmentError::Auth {
        provider: PROVIDER,
        message,
    }
}
