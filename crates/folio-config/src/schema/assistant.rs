//! Completion endpoint and conversation tuning.

use serde::{Deserialize, Serialize};

/// Assistant widget configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Chat-completion endpoint URL.
    pub endpoint: String,
    pub model: String,
    /// Most recent turns kept and sent with each request (valid range: 2-50).
    pub history_limit: u32,
    /// Completed turns before the contact postscript is offered (valid range: 1-20).
    pub contact_threshold: u32,
    /// Per-request timeout in seconds (valid range: 1-120).
    pub request_timeout_secs: u32,
    /// Minimum time the typing indicator stays up, in milliseconds (valid range: 0-5000).
    pub typing_delay_ms: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.groq.com/openai/v1/chat/completions".into(),
            model: "llama-3.1-8b-instant".into(),
            history_limit: 10,
            contact_threshold: 3,
            request_timeout_secs: 15,
            typing_delay_ms: 600,
        }
    }
}
