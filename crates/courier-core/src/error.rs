use http::StatusCode;
use serde::Serialize;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each feature crate's error type. The feature crates render
/// the response themselves, keeping this crate free of any web framework.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// Error envelope compatible with the `OpenAI` API
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
    code: u16,
}

impl ErrorBody {
    /// Build the envelope for any [`HttpError`]
    pub fn from_error<E: HttpError + ?Sized>(error: &E) -> Self {
        Self {
            error: ErrorDetails {
                message: error.client_message(),
                r#type: error.error_type().to_owned(),
                code: error.status_code().as_u16(),
            },
        }
    }
}

/// Client-facing message for transport failures; the detail stays in the logs
pub const UNREACHABLE_PROVIDER_MESSAGE: &str = "Failed to reach provider";

/// Pull the most specific diagnostic out of an upstream error body
///
/// Tries, in order: `error.message`, a string-valued `error`, a top-level
/// `message`, then the raw body text. Falls back to `fallback` when the body
/// is empty or carries none of these.
pub fn provider_message(body: &str, fallback: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();

    let structured = parsed.as_ref().and_then(|value| {
        let error = value.get("error");

        error
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
            .or_else(|| error.and_then(serde_json::Value::as_str))
            .or_else(|| value.get("message").and_then(serde_json::Value::as_str))
            .map(str::to_owned)
    });

    if let Some(message) = structured.filter(|m| !m.trim().is_empty()) {
        return message;
    }

    // A JSON document without a recognizable message is not worth echoing
    let raw = body.trim();
    if parsed.is_none() && !raw.is_empty() {
        return raw.to_owned();
    }

    fallback.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Error from provider";

    #[test]
    fn nested_error_message_wins() {
        let body = r#"{"error":{"message":"Invalid file id","type":"invalid_request_error"},"message":"outer"}"#;
        assert_eq!(provider_message(body, FALLBACK), "Invalid file id");
    }

    #[test]
    fn string_error_field() {
        assert_eq!(provider_message(r#"{"error":"quota exceeded"}"#, FALLBACK), "quota exceeded");
    }

    #[test]
    fn top_level_message() {
        assert_eq!(provider_message(r#"{"message":"upstream timeout"}"#, FALLBACK), "upstream timeout");
    }

    #[test]
    fn plain_text_body() {
        assert_eq!(provider_message("Bad Gateway\n", FALLBACK), "Bad Gateway");
    }

    #[test]
    fn empty_body_uses_fallback() {
        assert_eq!(provider_message("", FALLBACK), FALLBACK);
        assert_eq!(provider_message("   ", FALLBACK), FALLBACK);
    }

    #[test]
    fn json_without_message_uses_fallback() {
        assert_eq!(provider_message(r#"{"error":{"code":500}}"#, FALLBACK), FALLBACK);
        assert_eq!(provider_message(r#"{"error":{"message":""}}"#, FALLBACK), FALLBACK);
    }

    #[derive(Debug)]
    struct Teapot;

    impl std::fmt::Display for Teapot {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("short and stout")
        }
    }

    impl std::error::Error for Teapot {}

    impl HttpError for Teapot {
        fn status_code(&self) -> StatusCode {
            StatusCode::IM_A_TEAPOT
        }

        fn error_type(&self) -> &str {
            "teapot_error"
        }

        fn client_message(&self) -> String {
            self.to_string()
        }
    }

    #[test]
    fn envelope_carries_type_message_and_code() {
        let body = serde_json::to_value(ErrorBody::from_error(&Teapot)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "error": {
                    "message": "short and stout",
                    "type": "teapot_error",
                    "code": 418
                }
            })
        );
    }
}
