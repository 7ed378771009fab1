//! Mock OpenAI-compatible completion backend for failover tests
//!
//! Serves `/chat/completions` with scripted behavior: canned success,
//! failing statuses, empty choice lists, or an unresponsive hang, while
//! counting requests and capturing the last request for assertions.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Default completion text when no custom response is scripted
pub const DEFAULT_CONTENT: &str = "Hello from mock backend";

/// What the mock does once any scripted failures are used up
enum Behavior {
    /// Return a well-formed completion with this content
    Respond(String),
    /// Return 200 with an empty choice list
    EmptyChoices,
    /// Never answer within any reasonable test timeout
    Hang,
}

struct MockBackendState {
    completion_count: AtomicU32,
    /// Requests to fail before the behavior applies; `u32::MAX` fails forever
    fail_remaining: AtomicU32,
    fail_status: u16,
    behavior: Behavior,
    last_request: Mutex<Option<serde_json::Value>>,
    last_headers: Mutex<Option<HeaderMap>>,
}

/// Scripted completion backend bound to an ephemeral local port
pub struct MockBackend {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockBackendState>,
}

impl MockBackend {
    /// Backend that always succeeds with [`DEFAULT_CONTENT`]
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0, 500, Behavior::Respond(DEFAULT_CONTENT.to_owned())).await
    }

    /// Backend that always succeeds with custom content
    pub async fn start_with_response(content: &str) -> anyhow::Result<Self> {
        Self::start_inner(0, 500, Behavior::Respond(content.to_owned())).await
    }

    /// Backend that fails every request with the given status
    pub async fn start_failing(status: u16) -> anyhow::Result<Self> {
        Self::start_inner(u32::MAX, status, Behavior::Respond(DEFAULT_CONTENT.to_owned())).await
    }

    /// Backend that fails the first `n` requests with the given status,
    /// then succeeds with [`DEFAULT_CONTENT`]
    pub async fn start_failing_then_ok(n: u32, status: u16) -> anyhow::Result<Self> {
        Self::start_inner(n, status, Behavior::Respond(DEFAULT_CONTENT.to_owned())).await
    }

    /// Backend that returns 200 with no choices
    pub async fn start_empty_choices() -> anyhow::Result<Self> {
        Self::start_inner(0, 500, Behavior::EmptyChoices).await
    }

    /// Backend that accepts the connection and never responds
    pub async fn start_unresponsive() -> anyhow::Result<Self> {
        Self::start_inner(0, 500, Behavior::Hang).await
    }

    async fn start_inner(fail_remaining: u32, fail_status: u16, behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockBackendState {
            completion_count: AtomicU32::new(0),
            fail_remaining: AtomicU32::new(fail_remaining),
            fail_status,
            behavior,
            last_request: Mutex::new(None),
            last_headers: Mutex::new(None),
        });

        let app = Router::new()
            .route("/chat/completions", routing::post(handle_chat_completions))
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

    /// Endpoint root for a descriptor; the relay appends `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of completion requests received
    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    /// Body of the most recent completion request
    pub fn last_request(&self) -> Option<serde_json::Value> {
        self.state.last_request.lock().unwrap().clone()
    }

    /// Value of a header on the most recent completion request
    pub fn last_header(&self, name: &str) -> Option<String> {
        self.state
            .last_headers
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|headers| headers.get(name))
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_chat_completions(
    State(state): State<Arc<MockBackendState>>,
    headers: HeaderMap,
    Json(request): Json<serde_json::Value>,
) -> axum::response::Response {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    *state.last_request.lock().unwrap() = Some(request.clone());
    *state.last_headers.lock().unwrap() = Some(headers);

    let remaining = state.fail_remaining.load(Ordering::Relaxed);
    if remaining > 0 {
        if remaining != u32::MAX {
            state.fail_remaining.fetch_sub(1, Ordering::Relaxed);
        }
        let status = StatusCode::from_u16(state.fail_status).unwrap();
        return (
            status,
            Json(serde_json::json!({
                "error": {
                    "message": "mock backend scripted failure",
                    "type": "server_error"
                }
            })),
        )
            .into_response();
    }

    match &state.behavior {
        Behavior::Respond(content) => Json(serde_json::json!({
            "id": "chatcmpl-mock-1",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": request["model"],
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        }))
        .into_response(),
        Behavior::EmptyChoices => Json(serde_json::json!({
            "id": "chatcmpl-mock-1",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": request["model"],
            "choices": []
        }))
        .into_response(),
        Behavior::Hang => {
            tokio::time::sleep(Duration::from_secs(120)).await;
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
