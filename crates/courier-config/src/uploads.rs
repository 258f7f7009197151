use std::path::PathBuf;

use serde::Deserialize;

/// Upload gateway settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadsConfig {
    /// Directory for transient copies, defaults to the OS temp dir
    #[serde(default)]
    pub transient_dir: Option<PathBuf>,
    /// Purpose tag sent to the file-storage endpoint
    #[serde(default = "default_purpose")]
    pub purpose: String,
    /// Maximum accepted multipart body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            transient_dir: None,
            purpose: default_purpose(),
            body_limit: default_body_limit(),
        }
    }
}

impl UploadsConfig {
    /// Directory where transient copies are created
    pub fn transient_dir(&self) -> PathBuf {
        self.transient_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

fn default_purpose() -> String {
    "vision".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_body_limit() -> usize {
    25 << 20
}
