pub(crate) mod openai;

use async_trait::async_trait;

use crate::history::NormalizedHistory;

/// Upstream that turns a validated history into reply text
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request a completion for `history` from `model`
    async fn complete(&self, model: &str, history: &NormalizedHistory) -> crate::error::Result<String>;

    /// Get the provider name
    fn name(&self) -> &str;
}
