use courier_core::Upstream;
use secrecy::SecretString;

use crate::{
    error::{ChatError, Result},
    history::validate_and_normalize,
    provider::{CompletionProvider, openai::OpenAiCompletionProvider},
    types::{ChatReply, ChatRequest},
};

/// Chat server that validates histories and forwards them upstream
pub struct Server {
    provider: Box<dyn CompletionProvider>,
    model: String,
    body_limit: usize,
}

impl Server {
    /// Validate, normalize and forward a chat request
    ///
    /// Invalid histories are rejected here and never reach the provider.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply> {
        let history = validate_and_normalize(request.into_history().as_ref())?;

        tracing::debug!(
            provider = self.provider.name(),
            model = %self.model,
            messages = history.len(),
            "forwarding chat history"
        );

        let reply = self.provider.complete(&self.model, &history).await?;

        Ok(ChatReply { reply })
    }

    /// Maximum accepted request body in bytes
    pub const fn body_limit(&self) -> usize {
        self.body_limit
    }
}

/// Builder for constructing the chat server from configuration
pub struct ChatServerBuilder<'a> {
    config: &'a courier_config::Config,
    provider: Option<Box<dyn CompletionProvider>>,
}

impl<'a> ChatServerBuilder<'a> {
    pub fn new(config: &'a courier_config::Config) -> Self {
        Self { config, provider: None }
    }

    /// Use `provider` instead of the configured `OpenAI` endpoint
    #[must_use]
    pub fn with_provider(mut self, provider: Box<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<Server> {
        let provider = match self.provider {
            Some(provider) => provider,
            None => {
                let provider_config = &self.config.provider;
                let client = courier_core::http_client(provider_config.timeout_duration());

                Box::new(OpenAiCompletionProvider::new(Upstream::new(
                    client,
                    resolve_api_key(provider_config)?,
                    provider_config.base_url.as_ref(),
                )))
            }
        };

        tracing::debug!(
            "Chat server initialized with provider '{}' and model '{}'",
            provider.name(),
            self.config.chat.model
        );

        Ok(Server {
            provider,
            model: self.config.chat.model.clone(),
            body_limit: self.config.chat.body_limit,
        })
    }
}

fn resolve_api_key(config: &courier_config::ProviderConfig) -> Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| ChatError::ConfigError("API key required for the chat provider".to_string()))
}
