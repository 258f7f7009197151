//! Validation and normalization of a conversation history
//!
//! A history arrives as untyped JSON and leaves as a [`NormalizedHistory`]:
//! same length, same order, every image reference wrapped in a
//! single-element part array. Validation is all-or-nothing and reports the
//! lowest failing index.
//!
//! Only `image_file` parts are recognized as structured content. Any other
//! object, including other part types such as `text` or `image_url`, is
//! rejected rather than wrapped.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{Content, ContentPart, Message, Role};

/// Type marker of an uploaded image reference
const IMAGE_FILE: &str = "image_file";

/// Why a history was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// History absent, not an array, or empty
    #[error("No history provided: `history` must be a non-empty array of messages")]
    MissingHistory,

    /// First message with an unknown role or unrecognized content shape
    #[error("Invalid message at index {index}: expected a role of system, user or assistant and string or image_file content")]
    InvalidMessage { index: usize },
}

/// History ready to be handed to a completion provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedHistory(Vec<Message>);

impl NormalizedHistory {
    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated history
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.0
    }
}

/// Validate a candidate history and rewrite it into canonical form
///
/// # Errors
///
/// [`ValidationError::MissingHistory`] when `history` is absent, not an
/// array, or empty; [`ValidationError::InvalidMessage`] carrying the lowest
/// index whose role or content is unrecognized.
pub fn validate_and_normalize(history: Option<&Value>) -> Result<NormalizedHistory, ValidationError> {
    let entries = match history {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => return Err(ValidationError::MissingHistory),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_message(entry).ok_or(ValidationError::InvalidMessage { index }))
        .collect::<Result<Vec<_>, _>>()
        .map(NormalizedHistory)
}

fn parse_message(entry: &Value) -> Option<Message> {
    let fields = entry.as_object()?;

    let role = fields.get("role").and_then(Value::as_str).and_then(Role::from_wire)?;
    let content = parse_content(fields.get("content")?)?;

    Some(Message { role, content })
}

fn parse_content(content: &Value) -> Option<Content> {
    match content {
        Value::String(text) => Some(Content::Text(text.clone())),
        Value::Object(part) => parse_part(part).map(|part| Content::Parts(vec![part])),
        // Already wrapped by a previous pass
        Value::Array(parts) => match parts.as_slice() {
            [Value::Object(part)] => parse_part(part).map(|part| Content::Parts(vec![part])),
            _ => None,
        },
        _ => None,
    }
}

fn parse_part(part: &Map<String, Value>) -> Option<ContentPart> {
    if part.len() != 2 || part.get("type").and_then(Value::as_str) != Some(IMAGE_FILE) {
        return None;
    }

    match part.get("file_id") {
        Some(Value::String(file_id)) if !file_id.is_empty() => Some(ContentPart::ImageFile {
            file_id: file_id.clone(),
        }),
        _ => None,
    }
}
