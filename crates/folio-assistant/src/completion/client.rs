//! Completion client: credential lookup, request building and fallbacks.

use std::sync::Arc;

use folio_common::{new_correlation_id, Turn};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::credentials::CredentialResolver;
use crate::persona::PersonaProfile;
use crate::AiError;

use super::config::CompletionConfig;
use super::request::{ChatMessage, ChatRequest};
use super::transport::ChatTransport;

/// Reply used when no credential could be resolved.
pub const NO_CREDENTIAL_REPLY: &str = "The assistant isn't connected right now. \
     You can still reach me through the contact form or by email.";

/// Reply used when the endpoint fails, times out or the request is cancelled.
pub const UNAVAILABLE_REPLY: &str = "Sorry, I couldn't get an answer just now. \
     Please try again in a moment, or use the contact form to get in touch directly.";

/// Outcome of one completion: live model text or a fixed fallback reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Live(String),
    Fallback(String),
}

impl Completion {
    pub fn text(&self) -> &str {
        match self {
            Completion::Live(text) | Completion::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Completion::Live(text) | Completion::Fallback(text) => text,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Completion::Live(_))
    }
}

/// Issues one completion per call and never returns an error.
pub struct CompletionClient {
    config: CompletionConfig,
    transport: Arc<dyn ChatTransport>,
    credentials: Arc<CredentialResolver>,
}

impl CompletionClient {
    pub fn new(
        config: CompletionConfig,
        transport: Arc<dyn ChatTransport>,
        credentials: Arc<CredentialResolver>,
    ) -> Self {
        Self {
            config,
            transport,
            credentials,
        }
    }

    /// Complete the conversation `history`, whose last turn is the new user
    /// message, in the voice of `persona`.
    pub async fn complete(&self, history: &[Turn], persona: &PersonaProfile) -> String {
        self.complete_with_cancel(history, persona, &CancellationToken::new())
            .await
            .into_text()
    }

    /// Like [`complete`](Self::complete), abandoning the request when
    /// `cancel` fires.
    pub async fn complete_with_cancel(
        &self,
        history: &[Turn],
        persona: &PersonaProfile,
        cancel: &CancellationToken,
    ) -> Completion {
        let attempt =
            tokio::time::timeout(self.config.timeout, self.try_complete(history, persona));
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AiError::Cancelled),
            outcome = attempt => outcome.unwrap_or(Err(AiError::Timeout)),
        };
        match result {
            Ok(text) => Completion::Live(text),
            Err(AiError::MissingCredential) => Completion::Fallback(NO_CREDENTIAL_REPLY.to_string()),
            Err(e) => {
                warn!(error = %e, persona = %persona.mode, "completion failed, using fallback reply");
                Completion::Fallback(UNAVAILABLE_REPLY.to_string())
            }
        }
    }

    /// Credential lookup plus one request. Bounded as a whole by the
    /// caller's timeout and cancellation.
    async fn try_complete(
        &self,
        history: &[Turn],
        persona: &PersonaProfile,
    ) -> Result<String, AiError> {
        let credential = self
            .credentials
            .resolve()
            .await
            .ok_or(AiError::MissingCredential)?;

        let request = self.build_request(history, persona);
        let request_id = new_correlation_id();
        debug!(%request_id, persona = %persona.mode, turns = history.len(), "sending completion");

        let text = self.transport.send(&credential, &request).await?;

        debug!(%request_id, chars = text.len(), "completion received");
        Ok(text)
    }

    /// Preamble first, then the history in order.
    pub fn build_request(&self, history: &[Turn], persona: &PersonaProfile) -> ChatRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(persona.preamble.clone()));
        messages.extend(history.iter().map(ChatMessage::from));

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: persona.max_tokens,
            temperature: persona.temperature,
            top_p: persona.top_p,
            frequency_penalty: persona.frequency_penalty,
            presence_penalty: persona.presence_penalty,
        }
    }
}
