//! Chat-completion client for an OpenAI-compatible endpoint.
//!
//! [`CompletionClient::complete`] always yields displayable text: a missing
//! credential, a transport failure, a timeout or a cancellation each map to
//! a fixed fallback reply instead of an error.

mod client;
mod config;
mod request;
mod transport;


pub use client::{Completion, CompletionClient, NO_CREDENTIAL_REPLY, UNAVAILABLE_REPLY};
pub use config::CompletionConfig;
pub use request::{ChatMessage, ChatRequest};
pub use transport::{ChatTransport, HttpTransport};
