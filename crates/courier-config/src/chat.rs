use serde::Deserialize;

/// Chat completion settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum accepted JSON body size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            body_limit: default_body_limit(),
        }
    }
}

fn default_model() -> String {
    "gpt-4.1-mini-2025-04-14".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_body_limit() -> usize {
    1 << 20
}
