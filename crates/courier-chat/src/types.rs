use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
}

impl Role {
    /// Parse the wire name of a role, case-sensitively
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// One validated turn, in the shape the completion provider accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Role of the message author
    pub role: Role,
    /// Message content
    pub content: Content,
}

impl Message {
    /// Plain text message
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Content::Text(text.into()),
        }
    }
}

/// Message content, either plain text or a sequence of typed parts
///
/// Never a bare part: the provider accepts a string or an array of parts per
/// message and rejects a lone object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text content
    Text(String),
    /// Structured parts
    Parts(Vec<ContentPart>),
}

/// Structured content part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Reference to a previously uploaded file
    ImageFile {
        /// Identifier returned by the upload route
        file_id: String,
    },
}

/// Body of `POST /chat`
///
/// Either a full `history` or the single-message shorthand `message`. Both
/// are kept as raw JSON so the validator can report the exact offending
/// index instead of a generic parse error.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    /// Candidate history for validation
    ///
    /// `history` wins when present. A non-empty `message` becomes a one-turn
    /// user history. Anything else yields `None`.
    pub fn into_history(self) -> Option<Value> {
        if self.history.is_some() {
            return self.history;
        }

        match self.message? {
            Value::String(text) if text.trim().is_empty() => None,
            message => Some(serde_json::json!([{ "role": "user", "content": message }])),
        }
    }
}

/// Body returned by `POST /chat`
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    /// Completion text, verbatim from the provider
    pub reply: String,
}
