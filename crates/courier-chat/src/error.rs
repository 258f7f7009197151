use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use courier_core::{ErrorBody, HttpError, UpstreamFailure};
use thiserror::Error;

use crate::history::ValidationError;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Chat service errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum ChatError {
    /// History failed structural validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body could not be read or parsed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request body used the wrong content type
    #[error("Unsupported Content-Type, expected: 'Content-Type: application/json'")]
    UnsupportedMediaType,

    /// Request body exceeded the configured limit
    #[error("Request body is too large, limit is {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal server error
    /// If Some(message), it came from a provider and can be shown
    /// If None, it's an internal error and should not leak details
    #[error("Internal server error")]
    InternalError(Option<String>),
}

impl HttpError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ProviderApiError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::ConnectionError(_) => StatusCode::BAD_GATEWAY,
            Self::ConfigError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Validation(_) | Self::InvalidRequest(_) | Self::UnsupportedMediaType | Self::PayloadTooLarge { .. } => {
                "invalid_request_error"
            }
            Self::ConnectionError(_) | Self::ProviderApiError { .. } => "api_error",
            Self::ConfigError(_) | Self::InternalError(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::ProviderApiError { message, .. } => message.clone(),
            Self::InternalError(Some(provider_msg)) => provider_msg.clone(),
            Self::InternalError(None) | Self::ConfigError(_) => "Internal server error".to_string(),
            Self::ConnectionError(_) => courier_core::UNREACHABLE_PROVIDER_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}

impl From<UpstreamFailure> for ChatError {
    fn from(failure: UpstreamFailure) -> Self {
        Self::ProviderApiError {
            status: failure.status,
            message: failure.message,
        }
    }
}
