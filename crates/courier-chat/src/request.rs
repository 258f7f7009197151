use std::sync::Arc;

use axum::body::Body;
use serde::de::DeserializeOwned;

use crate::{error::ChatError, server::Server};

/// Extractor for JSON request bodies bounded by the server's body limit
pub struct ExtractPayload<T>(pub T);

impl<T: DeserializeOwned> axum::extract::FromRequest<Arc<Server>> for ExtractPayload<T> {
    type Rejection = ChatError;

    async fn from_request(request: http::Request<Body>, state: &Arc<Server>) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if !is_json(&parts.headers) {
            return Err(ChatError::UnsupportedMediaType);
        }

        let limit = state.body_limit();

        let bytes = axum::body::to_bytes(body, limit).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                ChatError::PayloadTooLarge { limit }
            } else {
                ChatError::InvalidRequest(format!("Failed to read request body: {err}"))
            }
        })?;

        serde_json::from_slice::<T>(&bytes)
            .map(Self)
            .map_err(|e| ChatError::InvalidRequest(format!("Failed to parse request body: {e}")))
    }
}

/// `application/json`, with or without parameters such as `charset`
fn is_json(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
