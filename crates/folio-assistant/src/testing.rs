//! Test doubles shared by the completion and conversation tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::completion::{ChatRequest, ChatTransport, CompletionClient, CompletionConfig};
use crate::credentials::{Credential, CredentialResolver, ResolverSettings};
use crate::preferences::{MemoryPreferenceStore, Preferences, CREDENTIAL_KEY};
use crate::AiError;

/// What the stub does for one call.
pub(crate) enum Reply {
    Text(String),
    Status(u16),
    Hang,
    /// Wait for the notify, then answer.
    Gated(Arc<Notify>, String),
}

/// Scripted transport that counts calls and records requests.
#[derive(Default)]
pub(crate) struct StubTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub(crate) fn push_text(&self, text: &str) {
        self.push(Reply::Text(text.to_string()));
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatTransport for StubTransport {
    async fn send(
        &self,
        _credential: &Credential,
        request: &ChatRequest,
    ) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::Text("ok".into()));
        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Status(code) => Err(AiError::ApiError(format!("HTTP {code}"))),
            Reply::Hang => std::future::pending().await,
            Reply::Gated(gate, text) => {
                gate.notified().await;
                Ok(text)
            }
        }
    }
}

pub(crate) fn resolver_with_key() -> Arc<CredentialResolver> {
    let store = MemoryPreferenceStore::new().with_entry(CREDENTIAL_KEY, "gsk_test");
    Arc::new(CredentialResolver::new(
        Preferences::new(Arc::new(store)),
        ResolverSettings::default(),
    ))
}

pub(crate) fn resolver_without_key() -> Arc<CredentialResolver> {
    Arc::new(CredentialResolver::new(
        Preferences::new(Arc::new(MemoryPreferenceStore::new())),
        ResolverSettings::default(),
    ))
}

pub(crate) fn client(
    transport: Arc<StubTransport>,
    credentials: Arc<CredentialResolver>,
) -> CompletionClient {
    CompletionClient::new(
        CompletionConfig::default().with_timeout(Duration::from_secs(15)),
        transport,
        credentials,
    )
}
