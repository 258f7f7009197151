use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or limits are out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_provider()?;
        self.validate_chat()?;
        self.validate_uploads()?;
        self.validate_tts()?;
        Ok(())
    }

    fn validate_provider(&self) -> anyhow::Result<()> {
        let has_key = self
            .provider
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty());

        if !has_key {
            anyhow::bail!("provider.api_key must not be empty");
        }

        if let Some(ref timeout) = self.provider.timeout {
            duration_str::parse(timeout)
                .map_err(|e| anyhow::anyhow!("invalid provider.timeout '{timeout}': {e}"))?;
        }

        Ok(())
    }

    fn validate_chat(&self) -> anyhow::Result<()> {
        if self.chat.model.trim().is_empty() {
            anyhow::bail!("chat.model must not be empty");
        }

        if self.chat.body_limit == 0 {
            anyhow::bail!("chat.body_limit must be greater than 0");
        }

        Ok(())
    }

    fn validate_uploads(&self) -> anyhow::Result<()> {
        if self.uploads.body_limit == 0 {
            anyhow::bail!("uploads.body_limit must be greater than 0");
        }

        if self.uploads.purpose.trim().is_empty() {
            anyhow::bail!("uploads.purpose must not be empty");
        }

        Ok(())
    }

    fn validate_tts(&self) -> anyhow::Result<()> {
        if self.tts.model.trim().is_empty() || self.tts.voice.trim().is_empty() {
            anyhow::bail!("tts.model and tts.voice must not be empty");
        }

        Ok(())
    }
}
