use serde::Deserialize;

/// Speech passthrough defaults
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Model used when the request names none
    #[serde(default = "default_model")]
    pub model: String,
    /// Voice used when the request names none
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Output format (mp3, opus, aac, flac, wav, pcm)
    #[serde(default)]
    pub response_format: Option<String>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            voice: default_voice(),
            response_format: None,
        }
    }
}

fn default_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}
