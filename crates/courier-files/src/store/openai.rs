use async_trait::async_trait;
use courier_core::{Upstream, UpstreamFailure};
use reqwest::{
    Body,
    multipart::{Form, Part},
};
use tokio_util::io::ReaderStream;

use crate::{error::UploadError, transient::TransientFile};

use super::BlobStore;

/// Diagnostic used when the provider error carries no message
const FALLBACK_MESSAGE: &str = "Error uploading file to OpenAI";

/// `OpenAI` Files API store
pub(crate) struct OpenAiFileStore {
    upstream: Upstream,
}

impl OpenAiFileStore {
    pub const fn new(upstream: Upstream) -> Self {
        Self { upstream }
    }
}

#[derive(serde::Deserialize)]
struct FileObject {
    id: String,
}

#[async_trait]
impl BlobStore for OpenAiFileStore {
    async fn put(
        &self,
        file: &TransientFile,
        filename: &str,
        content_type: &str,
        purpose: &str,
    ) -> crate::error::Result<String> {
        tracing::debug!(
            "OpenAI file upload: {} bytes, filename={filename}, purpose={purpose}",
            file.len()
        );

        let source = tokio::fs::File::open(file.path()).await.map_err(|e| {
            tracing::error!("Failed to reopen transient copy: {e}");
            UploadError::TransientStorage(e.to_string())
        })?;

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(source)), file.len())
            .file_name(filename.to_owned())
            .mime_str(content_type)
            .map_err(|e| UploadError::InvalidRequest(format!("Invalid content type: {e}")))?;

        let form = Form::new().part("file", part).text("purpose", purpose.to_owned());

        let response = self
            .upstream
            .post("files")
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI file upload failed: {e}");
                UploadError::ConnectionError(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(UpstreamFailure::read(response, FALLBACK_MESSAGE).await.into());
        }

        let result: FileObject = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI file response: {e}");
            UploadError::InternalError(None)
        })?;

        tracing::debug!("OpenAI file upload complete: {}", result.id);

        Ok(result.id)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
