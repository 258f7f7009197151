//! Mock OpenAI-compatible backend for integration tests
//!
//! Serves chat completions, file uploads and speech with canned responses
//! and records what it received.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing,
};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Canned audio returned by the speech endpoint
pub const MOCK_AUDIO: &[u8] = b"ID3\x04\x00mock-audio";

/// File received by the mock `/files` endpoint
#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
    pub purpose: Option<String>,
}

/// Mock provider that returns predictable responses
pub struct MockProvider {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

#[derive(Default)]
struct MockState {
    /// When set, every endpoint answers with this status and raw body
    failure: Option<(StatusCode, String)>,
    reply: Option<String>,
    completions: Mutex<Vec<Value>>,
    files: Mutex<Vec<ReceivedFile>>,
    speech: Mutex<Vec<Value>>,
    authorization: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(MockState::default()).await
    }

    /// Start a mock server whose chat completions reply with `content`
    pub async fn start_with_reply(content: &str) -> anyhow::Result<Self> {
        Self::start_inner(MockState {
            reply: Some(content.to_owned()),
            ..MockState::default()
        })
        .await
    }

    /// Start a mock server that fails every request with `status` and `body`
    pub async fn start_failing(status: u16, body: &str) -> anyhow::Result<Self> {
        Self::start_inner(MockState {
            failure: Some((StatusCode::from_u16(status)?, body.to_owned())),
            ..MockState::default()
        })
        .await
    }

    async fn start_inner(state: MockState) -> anyhow::Result<Self> {
        let state = Arc::new(state);

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .route("/v1/files", routing::post(handle_files))
            .route("/v1/audio/speech", routing::post(handle_speech))
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

    /// Base URL for configuring the mock as a provider
    ///
    /// Includes `/v1` since the providers append paths like `/chat/completions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Bodies of the completion requests received
    pub fn completions(&self) -> Vec<Value> {
        self.state.completions.lock().unwrap().clone()
    }

    /// Files received by the upload endpoint
    pub fn files(&self) -> Vec<ReceivedFile> {
        self.state.files.lock().unwrap().clone()
    }

    /// Bodies of the speech requests received
    pub fn speech_requests(&self) -> Vec<Value> {
        self.state.speech.lock().unwrap().clone()
    }

    /// `Authorization` headers seen across all endpoints
    pub fn authorization_headers(&self) -> Vec<String> {
        self.state.authorization.lock().unwrap().clone()
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl MockState {
    fn record_auth(&self, headers: &HeaderMap) {
        if let Some(value) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            self.authorization.lock().unwrap().push(value.to_owned());
        }
    }

    fn failure_response(&self) -> Option<Response> {
        self.failure
            .as_ref()
            .map(|(status, body)| (*status, body.clone()).into_response())
    }
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record_auth(&headers);
    state.completions.lock().unwrap().push(body.clone());

    if let Some(response) = state.failure_response() {
        return response;
    }

    let content = state.reply.as_deref().unwrap_or("Hello from mock provider");

    Json(json!({
        "id": "chatcmpl-test-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": body["model"],
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    }))
    .into_response()
}

async fn handle_files(State(state): State<Arc<MockState>>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    state.record_auth(&headers);

    let mut received = ReceivedFile {
        filename: None,
        content_type: None,
        data: Vec::new(),
        purpose: None,
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("file") => {
                received.filename = field.file_name().map(str::to_owned);
                received.content_type = field.content_type().map(str::to_owned);
                received.data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            }
            Some("purpose") => received.purpose = field.text().await.ok(),
            _ => {}
        }
    }

    let size = received.data.len();
    let count = {
        let mut files = state.files.lock().unwrap();
        files.push(received);
        files.len()
    };

    if let Some(response) = state.failure_response() {
        return response;
    }

    Json(json!({
        "id": format!("file-mock-{count}"),
        "object": "file",
        "bytes": size,
        "created_at": 1_700_000_000,
        "purpose": "vision"
    }))
    .into_response()
}

async fn handle_speech(State(state): State<Arc<MockState>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record_auth(&headers);
    state.speech.lock().unwrap().push(body);

    if let Some(response) = state.failure_response() {
        return response;
    }

    ([(header::CONTENT_TYPE, "audio/mpeg")], MOCK_AUDIO).into_response()
}
