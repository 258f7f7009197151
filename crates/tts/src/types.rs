use serde::{Deserialize, Serialize};

/// Body of `POST /tts`
#[derive(Debug, Default, Deserialize)]
pub struct TtsRequest {
    /// Text to synthesize
    #[serde(default)]
    pub text: String,
    /// Voice override, defaults to the configured voice
    pub voice: Option<String>,
    /// Model override, defaults to the configured model
    pub model: Option<String>,
    /// Output audio format (mp3, opus, aac, flac, wav, pcm)
    pub response_format: Option<String>,
    /// Speech speed multiplier (0.25 to 4.0)
    pub speed: Option<f64>,
}

/// Speech synthesis request, serialized as the `OpenAI` `/audio/speech` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    /// Model identifier (e.g. "tts-1")
    pub model: String,
    /// Text to synthesize into speech
    pub input: String,
    /// Voice identifier (e.g. "alloy")
    pub voice: String,
    /// Output audio format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    /// Speech speed multiplier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Raw audio response from a TTS provider
pub struct SpeechResponse {
    /// Raw audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio (e.g. "audio/mpeg")
    pub content_type: String,
}

impl axum::response::IntoResponse for SpeechResponse {
    fn into_response(self) -> axum::response::Response {
        ([(http::header::CONTENT_TYPE, self.content_type)], self.audio).into_response()
    }
}
