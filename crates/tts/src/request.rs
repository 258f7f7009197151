use axum::body::Body;
use serde::de::DeserializeOwned;

use crate::error::TtsError;

/// Extractor for JSON request bodies
pub struct ExtractPayload<T>(pub T);

/// Body limit for TTS requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = TtsError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        let is_json = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));

        if !is_json {
            return Err(TtsError::UnsupportedMediaType);
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                TtsError::PayloadTooLarge {
                    limit: BODY_LIMIT_BYTES,
                }
            } else {
                TtsError::InvalidRequest(format!("Failed to read request body: {err}"))
            }
        })?;

        serde_json::from_slice::<T>(&bytes)
            .map(Self)
            .map_err(|e| TtsError::InvalidRequest(format!("Failed to parse request body: {e}")))
    }
}
