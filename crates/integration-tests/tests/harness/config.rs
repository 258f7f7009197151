//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, path::Path};

use courier_config::{Config, CorsConfig, HealthConfig, ServerConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                ..Config::default()
            },
        }
    }

    /// Point every route at a mock OpenAI-compatible backend
    pub fn with_provider(mut self, base_url: &str) -> Self {
        self.config.provider.api_key = Some(SecretString::from("test-key"));
        self.config.provider.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Keep transient upload copies in `dir`
    pub fn with_transient_dir(mut self, dir: &Path) -> Self {
        self.config.uploads.transient_dir = Some(dir.to_path_buf());
        self
    }

    /// Cap multipart upload bodies at `bytes`
    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.config.uploads.body_limit = bytes;
        self
    }

    /// Use `model` for chat completions
    pub fn with_chat_model(mut self, model: &str) -> Self {
        self.config.chat.model = model.to_owned();
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Serve the health check on `path`
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
