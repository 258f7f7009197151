use async_trait::async_trait;
use courier_core::{Upstream, UpstreamFailure};

use crate::{
    error::TtsError,
    types::{SpeechRequest, SpeechResponse},
};

use super::TtsProvider;

/// Diagnostic used when the provider error carries no message
const FALLBACK_MESSAGE: &str = "Error from OpenAI TTS API";

/// Audio type assumed when the provider omits a `Content-Type`
const DEFAULT_AUDIO_TYPE: &str = "audio/mpeg";

/// Speech synthesis through `POST {base_url}/audio/speech`
pub(crate) struct OpenAiTtsProvider {
    upstream: Upstream,
}

impl OpenAiTtsProvider {
    pub const fn new(upstream: Upstream) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl TtsProvider for OpenAiTtsProvider {
    async fn synthesize(&self, request: SpeechRequest) -> crate::error::Result<SpeechResponse> {
        tracing::debug!(
            model = %request.model,
            voice = %request.voice,
            chars = request.input.len(),
            "requesting speech"
        );

        let response = self
            .upstream
            .post("audio/speech")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("speech request did not reach the provider: {e}");
                TtsError::ConnectionError(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(UpstreamFailure::read(response, FALLBACK_MESSAGE).await.into());
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_AUDIO_TYPE)
            .to_owned();

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("speech audio could not be read: {e}");
            TtsError::InternalError(None)
        })?;

        tracing::debug!(bytes = audio.len(), %content_type, "speech received");

        Ok(SpeechResponse {
            audio: audio.to_vec(),
            content_type,
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}
