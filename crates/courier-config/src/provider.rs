use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Upstream OpenAI-compatible provider shared by chat, uploads and speech
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override, defaults to `https://api.openai.com/v1`
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Per-request timeout (e.g. "120s", "2m")
    #[serde(default)]
    pub timeout: Option<String>,
}

impl ProviderConfig {
    /// Parsed request timeout
    ///
    /// Returns `None` when unset. The loader rejects unparsable values, so
    /// an invalid string here only happens for hand-built configs and is
    /// treated as unset.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.as_deref().and_then(|s| duration_str::parse(s).ok())
    }
}
