#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod request;
mod server;
mod store;
mod transient;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::post,
};

pub use error::{Result, UploadError};
pub use server::{Server, UploadServerBuilder};
pub use store::BlobStore;
pub use transient::{TransientFile, TransientWriter};
pub use types::{UploadPayload, UploadReference};
use request::ExtractUpload;

/// Build the upload gateway from configuration
pub fn build_server(config: &courier_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        UploadServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize upload gateway: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for uploads
///
/// The extractor enforces the configured limit itself while streaming, so
/// axum's default multipart limit is lifted for this route.
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::disable())
}

/// Handle file uploads
async fn upload(
    State(server): State<Arc<Server>>,
    ExtractUpload(payload): ExtractUpload,
) -> Result<Json<UploadReference>> {
    if let Some(ref payload) = payload {
        tracing::debug!(
            "Upload handler called: {} bytes, filename={}",
            payload.file.len(),
            payload.filename
        );
    }

    let reference = server.store_and_reference(payload).await?;

    Ok(Json(reference))
}
