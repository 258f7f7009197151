#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Router, extract::State, routing::post};

pub use error::{Result, TtsError};
pub use provider::TtsProvider;
pub use server::{Server, TtsServerBuilder};
pub use types::{SpeechRequest, SpeechResponse, TtsRequest};
use request::ExtractPayload;

/// Build the TTS server from configuration
pub fn build_server(config: &courier_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        TtsServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for TTS
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/tts", post(synthesize))
}

/// Handle speech synthesis requests
async fn synthesize(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<TtsRequest>,
) -> Result<SpeechResponse> {
    tracing::debug!("TTS speech handler called, text_len={}", request.text.len());

    let response = server.synthesize(request).await?;

    tracing::debug!("Speech synthesis complete");

    Ok(response)
}
