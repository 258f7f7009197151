pub(crate) mod openai;

use async_trait::async_trait;

use crate::transient::TransientFile;

/// Remote blob storage that hands back an identifier for stored content
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stream `file` to storage under `filename`, tagged with `purpose`
    ///
    /// Returns the provider-assigned identifier.
    async fn put(
        &self,
        file: &TransientFile,
        filename: &str,
        content_type: &str,
        purpose: &str,
    ) -> crate::error::Result<String>;

    /// Get the store name
    fn name(&self) -> &str;
}
