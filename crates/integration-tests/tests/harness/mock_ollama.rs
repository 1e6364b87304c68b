//! Mock Ollama server for integration tests
//!
//! Answers `POST /api/generate` with a canned status and body and records
//! every request it receives.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Mock Ollama backend that returns a fixed reply
pub struct MockOllama {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockOllamaState>,
}

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

struct MockOllamaState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Mutex<Vec<ReceivedRequest>>,
}

impl MockOllama {
    /// Reply 200 with the given JSON value
    pub async fn start_json(value: &serde_json::Value) -> anyhow::Result<Self> {
        Self::start_raw(StatusCode::OK, &value.to_string()).await
    }

    /// Reply 200 with one NDJSON record per value, like a streaming Ollama
    pub async fn start_stream(records: &[serde_json::Value]) -> anyhow::Result<Self> {
        let body: String = records.iter().map(|record| format!("{record}\n")).collect();
        Self::start_raw(StatusCode::OK, &body).await
    }

    /// Reply with an arbitrary status and body
    pub async fn start_raw(status: StatusCode, body: &str) -> anyhow::Result<Self> {
        Self::start_inner(status, body.to_owned(), Duration::ZERO).await
    }

    /// Reply 200 with `{"response": "late"}` after `delay`
    pub async fn start_slow(delay: Duration) -> anyhow::Result<Self> {
        Self::start_inner(StatusCode::OK, r#"{"response":"late"}"#.to_owned(), delay).await
    }

    async fn start_inner(status: StatusCode, body: String, delay: Duration) -> anyhow::Result<Self> {
        let state = Arc::new(MockOllamaState {
            status,
            body,
            delay,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/generate", routing::post(handle_generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the Ollama server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Number of generation requests received
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

impl Drop for MockOllama {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(State(state): State<Arc<MockOllamaState>>, headers: HeaderMap, body: Bytes) -> Response {
    let received = ReceivedRequest {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    };
    state.requests.lock().unwrap().push(received);

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
        .into_response()
}
