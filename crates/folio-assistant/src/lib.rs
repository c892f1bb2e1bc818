//! Assistant engine for the Folio portfolio widget.
//!
//! Provides:
//! - A preference store with graceful degradation when storage is unavailable
//! - Credential resolution through an ordered fallback chain
//! - A chat-completion client that always answers with displayable text
//! - The conversation manager that owns history, persona mode and busy state

pub mod completion;
pub mod conversation;
pub mod credentials;
pub mod persona;
pub mod preferences;

#[cfg(test)]
pub(crate) mod testing;

pub use completion::{
    ChatMessage, ChatRequest, ChatTransport, Completion, CompletionClient, CompletionConfig,
    HttpTransport, NO_CREDENTIAL_REPLY, UNAVAILABLE_REPLY,
};
pub use conversation::{ConversationError, ConversationManager, ConversationSettings};
pub use credentials::{Credential, CredentialResolver, DevResource, ResolverSettings};
pub use persona::{PersonaProfile, BACK_TO_ASSISTANT, SWITCH_TO_HUMAN};
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences, Theme,
};

/// Failures on the live completion path. Never surfaced past
/// [`CompletionClient::complete`]; each maps to a fallback reply.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Cancelled")]
    Cancelled,
    #[error("No credential available")]
    MissingCredential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_error_display() {
        assert_eq!(AiError::RateLimited.to_string(), "Rate limited");
        assert_eq!(
            AiError::ApiError("HTTP 500".into()).to_string(),
            "API error: HTTP 500"
        );
        assert_eq!(AiError::Timeout.to_string(), "Timeout");
    }
}
