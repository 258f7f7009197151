use async_trait::async_trait;
use courier_core::{Upstream, UpstreamFailure};

use crate::{error::ChatError, history::NormalizedHistory, types::Message};

use super::CompletionProvider;

/// Diagnostic used when the provider error carries no message
const FALLBACK_MESSAGE: &str = "Error from OpenAI API";

/// `OpenAI` chat completions provider
pub(crate) struct OpenAiCompletionProvider {
    upstream: Upstream,
}

impl OpenAiCompletionProvider {
    pub const fn new(upstream: Upstream) -> Self {
        Self { upstream }
    }
}

#[derive(serde::Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(serde::Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(serde::Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, model: &str, history: &NormalizedHistory) -> crate::error::Result<String> {
        tracing::debug!("OpenAI completion request: model={model}, messages={}", history.len());

        let body = CompletionRequest {
            model,
            messages: history.messages(),
        };

        let response = self
            .upstream
            .post("chat/completions")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI completion request failed: {e}");
                ChatError::ConnectionError(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(UpstreamFailure::read(response, FALLBACK_MESSAGE).await.into());
        }

        let result: CompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI completion response: {e}");
            ChatError::InternalError(None)
        })?;

        let reply = result
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                tracing::error!("OpenAI completion response contained no choices");
                ChatError::InternalError(Some("Provider returned no completion".to_string()))
            })?
            .message
            .content
            .unwrap_or_default();

        tracing::debug!("OpenAI completion complete, {} chars", reply.len());

        Ok(reply)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
