//! Optional service configuration (language-model fallback, logging).

use serde::{Deserialize, Serialize};

/// Language-model fallback for form fields no keyword rule classifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    #[serde(default)]
    pub enabled: bool,

    /// OpenAI-compatible chat-completions endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_api_url(),
            api_key: None,
            model: default_model(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `"debug"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log file directory. Defaults to `~/.easyapply/logs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}
