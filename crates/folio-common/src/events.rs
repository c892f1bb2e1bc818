use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{PersonaMode, Suggestion, Turn};

/// Notifications a conversation publishes to whatever is rendering it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    MessageAppended(Turn),
    PersonaChanged(PersonaMode),
    BusyChanged(bool),
    SuggestionsChanged(Vec<Suggestion>),
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Returns the number of receivers reached. Publishing with nobody
    /// listening is not an error.
    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
