use std::path::{Path, PathBuf};

use courier_core::Upstream;
use secrecy::SecretString;

use crate::{
    error::{Result, UploadError},
    store::{BlobStore, openai::OpenAiFileStore},
    types::{UploadPayload, UploadReference},
};

/// Upload gateway that forwards files to blob storage through a transient copy
pub struct Server {
    store: Box<dyn BlobStore>,
    transient_dir: PathBuf,
    purpose: String,
    body_limit: usize,
}

impl Server {
    /// Store `payload` remotely and return its reference
    ///
    /// The local copy is gone by the time this returns, whatever the outcome.
    /// One attempt per call; failures are not retried.
    pub async fn store_and_reference(&self, payload: Option<UploadPayload>) -> Result<UploadReference> {
        let UploadPayload {
            file,
            filename,
            content_type,
        } = payload.ok_or(UploadError::NoFileProvided)?;

        let stored = self.store.put(&file, &filename, &content_type, &self.purpose).await;

        drop(file);

        let file_id = stored?;

        tracing::info!(store = self.store.name(), file_id = %file_id, "upload stored");

        Ok(UploadReference { file_id })
    }

    /// Directory holding transient copies
    pub fn transient_dir(&self) -> &Path {
        &self.transient_dir
    }

    /// Maximum accepted request body in bytes
    pub const fn body_limit(&self) -> usize {
        self.body_limit
    }
}

/// Builder for constructing the upload gateway from configuration
pub struct UploadServerBuilder<'a> {
    config: &'a courier_config::Config,
    store: Option<Box<dyn BlobStore>>,
}

impl<'a> UploadServerBuilder<'a> {
    pub fn new(config: &'a courier_config::Config) -> Self {
        Self { config, store: None }
    }

    /// Use `store` instead of the configured `OpenAI` Files endpoint
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn BlobStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<Server> {
        let store = match self.store {
            Some(store) => store,
            None => {
                let provider_config = &self.config.provider;
                let client = courier_core::http_client(provider_config.timeout_duration());

                Box::new(OpenAiFileStore::new(Upstream::new(
                    client,
                    resolve_api_key(provider_config)?,
                    provider_config.base_url.as_ref(),
                )))
            }
        };

        let uploads = &self.config.uploads;
        let transient_dir = uploads.transient_dir();

        tracing::debug!(
            "Upload gateway initialized with store '{}', transient dir {}",
            store.name(),
            transient_dir.display()
        );

        Ok(Server {
            store,
            transient_dir,
            purpose: uploads.purpose.clone(),
            body_limit: uploads.body_limit,
        })
    }
}

fn resolve_api_key(config: &courier_config::ProviderConfig) -> Result<SecretString> {
    config
        .api_key
        .clone()
        .ok_or_else(|| UploadError::ConfigError("API key required for the file store".to_string()))
}
