#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod history;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{ChatError, Result};
pub use history::{NormalizedHistory, ValidationError, validate_and_normalize};
pub use provider::CompletionProvider;
pub use server::{ChatServerBuilder, Server};
pub use types::{ChatReply, ChatRequest, Content, ContentPart, Message, Role};
use request::ExtractPayload;

/// Build the chat server from configuration
pub fn build_server(config: &courier_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        ChatServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize chat server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for chat
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/chat", post(chat))
}

/// Handle chat requests
async fn chat(
    State(server): State<Arc<Server>>,
    ExtractPayload(request): ExtractPayload<ChatRequest>,
) -> Result<Json<ChatReply>> {
    let reply = server.chat(request).await?;

    tracing::debug!("Chat completion returned {} bytes", reply.reply.len());

    Ok(Json(reply))
}
