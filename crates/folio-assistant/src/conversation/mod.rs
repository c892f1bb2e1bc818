//! Conversation management.
//!
//! A `ConversationManager` owns the bounded history, the persona mode and
//! the turn counter for one widget, and publishes every visible change on
//! its event bus. At most one completion is in flight at a time.

mod chat;
mod manager;
mod types;


pub use manager::ConversationManager;
pub use types::{ConversationError, ConversationSettings};
