#![allow(clippy::must_use_candidate)]

pub mod chat;
pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod provider;
pub mod server;
pub mod telemetry;
pub mod tts;
pub mod uploads;

use serde::Deserialize;

pub use chat::*;
pub use cors::*;
pub use env::ExpandError;
pub use health::*;
pub use provider::*;
pub use server::*;
pub use telemetry::{ExportProtocol, ExporterConfig, TelemetryConfig, TracingConfig};
pub use tts::*;
pub use uploads::*;

/// Top-level Courier configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener, health and CORS settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream OpenAI-compatible provider
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Chat completion settings
    #[serde(default)]
    pub chat: ChatConfig,
    /// Upload gateway settings
    #[serde(default)]
    pub uploads: UploadsConfig,
    /// Speech passthrough settings
    #[serde(default)]
    pub tts: TtsConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
