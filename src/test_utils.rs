//! Test utilities for vibecheck tests.
//!
//! Provides a local HTTP stub that stands in for Spotify, Genius or the ML
//! service, so the real clients can be exercised end to end.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::stub_server;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let stub = stub_server(|_| (200, r#"{"ok":true}"#.to_string())).await;
//!     // point a client at stub.base_url, then inspect stub.requests()
//! }
//! ```

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderMap, StatusCode, header};

/// A request received by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    /// Value of a header as text, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A running stub server
pub struct StubServer {
    /// `http://127.0.0.1:<port>`, without a trailing slash
    pub base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

/// Start a stub on an ephemeral loopback port.
///
/// `respond` maps each request to a status code and a JSON body. The server
/// runs until the test's runtime shuts down.
pub async fn stub_server<F>(respond: F) -> StubServer
where
    F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
{
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();
    let respond = Arc::new(respond);

    let app = Router::new().fallback(move |request: Request| {
        let log = log.clone();
        let respond = respond.clone();
        async move {
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX)
                .await
                .expect("Failed to read stub request body");
            let seen = RecordedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                query: parts.uri.query().unwrap_or_default().to_string(),
                headers: parts.headers,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            };

            let (status, body) = respond(&seen);
            log.lock().unwrap().push(seen);

            (
                StatusCode::from_u16(status).expect("Invalid stub status"),
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Stub server has no address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubServer {
        base_url: format!("http://{addr}"),
        recorded,
    }
}

/// Stub response helper: 200 with `body`
pub fn ok(body: serde_json::Value) -> (u16, String) {
    (200, body.to_string())
}

/// Stub response helper: `status` with `body`
pub fn status(status: u16, body: serde_json::Value) -> (u16, String) {
    (status, body.to_string())
}
