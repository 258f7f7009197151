use serde::{Deserialize, Serialize};

use crate::transient::TransientFile;

/// Filename used when the form omits one
pub const DEFAULT_FILENAME: &str = "upload";

/// Content type used when the form omits one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// File received from a client, already spooled to a transient copy
#[derive(Debug)]
pub struct UploadPayload {
    /// Local copy, removed when the payload drops
    pub file: TransientFile,
    /// Original client-side filename
    pub filename: String,
    /// Declared media type
    pub content_type: String,
}

/// Identifier returned by `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReference {
    /// Provider-assigned file identifier, opaque to the gateway
    pub file_id: String,
}
