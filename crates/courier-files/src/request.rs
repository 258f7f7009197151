use std::sync::Arc;

use axum::{
    body::Body,
    extract::{
        FromRequest, Multipart,
        multipart::{Field, MultipartError},
    },
};
use http::{HeaderMap, StatusCode, header};
use http_body_util::Limited;

use crate::{
    error::UploadError,
    server::Server,
    transient::TransientFile,
    types::{DEFAULT_CONTENT_TYPE, DEFAULT_FILENAME, UploadPayload},
};

/// Name of the form field carrying the file
const FILE_FIELD: &str = "file";

/// Extractor for multipart forms carrying a single `file` field
///
/// The file is streamed into a transient copy as it arrives, so the body is
/// never buffered whole. Yields `None` when the form has no file, so the
/// gateway decides how to answer. Other fields are ignored.
pub struct ExtractUpload(pub Option<UploadPayload>);

impl FromRequest<Arc<Server>> for ExtractUpload {
    type Rejection = UploadError;

    async fn from_request(request: http::Request<Body>, state: &Arc<Server>) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        let is_multipart = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        if !is_multipart {
            return Err(UploadError::UnsupportedMediaType);
        }

        let limit = state.body_limit();

        if content_length(&parts.headers).is_some_and(|len| len > limit) {
            return Err(UploadError::PayloadTooLarge { limit });
        }

        let limited = http::Request::from_parts(parts, Body::new(Limited::new(body, limit)));

        let mut multipart = Multipart::from_request(limited, &())
            .await
            .map_err(|e| UploadError::InvalidRequest(format!("Failed to parse multipart form: {}", e.body_text())))?;

        let mut payload = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(&e, limit))? {
            if field.name() != Some(FILE_FIELD) || payload.is_some() {
                continue;
            }

            payload = spool(field, state, limit).await?;
        }

        Ok(Self(payload))
    }
}

/// Stream the file part into a transient copy
///
/// Nothing touches disk until the first chunk arrives. An empty, unnamed
/// part is what browsers send when no file was chosen, and counts as absent.
async fn spool(mut field: Field<'_>, state: &Server, limit: usize) -> Result<Option<UploadPayload>, UploadError> {
    let filename = field
        .file_name()
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    let content_type = field
        .content_type()
        .map_or_else(|| DEFAULT_CONTENT_TYPE.to_string(), str::to_string);

    let filename_or_default = filename.as_deref().unwrap_or(DEFAULT_FILENAME);

    let Some(first) = field.chunk().await.map_err(|e| multipart_error(&e, limit))? else {
        if filename.is_none() {
            return Ok(None);
        }

        let empty = TransientFile::create(state.transient_dir(), filename_or_default).await?;
        return Ok(Some(UploadPayload {
            file: empty.finish().await?,
            filename: filename_or_default.to_string(),
            content_type,
        }));
    };

    let mut writer = TransientFile::create(state.transient_dir(), filename_or_default).await?;
    writer.write(&first).await?;

    while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(&e, limit))? {
        writer.write(&chunk).await?;
    }

    Ok(Some(UploadPayload {
        file: writer.finish().await?,
        filename: filename_or_default.to_string(),
        content_type,
    }))
}

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

fn multipart_error(err: &MultipartError, limit: usize) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::PayloadTooLarge { limit }
    } else {
        UploadError::InvalidRequest(format!("Failed to parse multipart form: {}", err.body_text()))
    }
}
