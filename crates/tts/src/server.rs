use courier_core::Upstream;
use secrecy::SecretString;

use crate::{
    error::TtsError,
    provider::{TtsProvider, openai_tts::OpenAiTtsProvider},
    types::{SpeechRequest, SpeechResponse, TtsRequest},
};

/// Accepted range of the speed multiplier
const SPEED_RANGE: std::ops::RangeInclusive<f64> = 0.25..=4.0;

/// TTS server that fills in configured defaults and forwards to the provider
pub struct Server {
    provider: Box<dyn TtsProvider>,
    model: String,
    voice: String,
    response_format: Option<String>,
}

impl Server {
    /// Synthesize text to speech
    ///
    /// Missing voice, model and format fall back to the `[tts]` settings.
    pub async fn synthesize(&self, request: TtsRequest) -> crate::error::Result<SpeechResponse> {
        let request = self.resolve(request)?;

        self.provider.synthesize(request).await
    }

    fn resolve(&self, request: TtsRequest) -> crate::error::Result<SpeechRequest> {
        if request.text.trim().is_empty() {
            return Err(TtsError::InvalidRequest("No text provided".to_string()));
        }

        if request.speed.is_some_and(|speed| !SPEED_RANGE.contains(&speed)) {
            return Err(TtsError::InvalidRequest(format!(
                "speed must be between {} and {}",
                SPEED_RANGE.start(),
                SPEED_RANGE.end()
            )));
        }

        Ok(SpeechRequest {
            model: non_blank(request.model).unwrap_or_else(|| self.model.clone()),
            input: request.text,
            voice: non_blank(request.voice).unwrap_or_else(|| self.voice.clone()),
            response_format: non_blank(request.response_format).or_else(|| self.response_format.clone()),
            speed: request.speed,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Builder for constructing the TTS server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a courier_config::Config,
    provider: Option<Box<dyn TtsProvider>>,
}

impl<'a> TtsServerBuilder<'a> {
    pub fn new(config: &'a courier_config::Config) -> Self {
        Self { config, provider: None }
    }

    /// Use `provider` instead of the configured `OpenAI` endpoint
    #[must_use]
    pub fn with_provider(mut self, provider: Box<dyn TtsProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> crate::error::Result<Server> {
        let provider = match self.provider {
            Some(provider) => provider,
            None => {
                let provider_config = &self.config.provider;
                let client = courier_core::http_client(provider_config.timeout_duration());

                Box::new(OpenAiTtsProvider::new(Upstream::new(
                    client,
                    resolve_api_key(provider_config)?,
                    provider_config.base_url.as_ref(),
                )))
            }
        };

        let tts = &self.config.tts;

        tracing::debug!(
            "TTS server initialized with provider '{}', default voice '{}'",
            provider.name(),
            tts.voice
        );

        Ok(Server {
            provider,
            model: tts.model.clone(),
            voice: tts.voice.clone(),
            response_format: tts.response_format.clone(),
        })
    }
}

fn resolve_api_key(config: &courier_config::ProviderConfig) -> crate::error::Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| TtsError::ConfigError("API key required for the TTS provider".to_string()))
}
