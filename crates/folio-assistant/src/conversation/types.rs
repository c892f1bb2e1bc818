//! Conversation settings, errors and the busy guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use folio_common::{Event, EventBus};

/// Tuning for one conversation.
#[derive(Debug, Clone)]
pub struct ConversationSettings {
    /// Most recent turns kept (and sent); older turns are dropped first.
    pub history_limit: usize,
    /// Completed turns before the contact postscript is added.
    pub contact_threshold: u32,
    /// Minimum time between a submit and its reply appearing.
    pub typing_delay: Duration,
    pub event_capacity: usize,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            history_limit: 10,
            contact_threshold: 3,
            typing_delay: Duration::from_millis(600),
            event_capacity: 64,
        }
    }
}

impl ConversationSettings {
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn with_contact_threshold(mut self, threshold: u32) -> Self {
        self.contact_threshold = threshold;
        self
    }

    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversationError {
    #[error("a reply is still pending")]
    Busy,
    #[error("message is empty")]
    EmptyMessage,
}

/// Holds the busy flag for the lifetime of one operation.
///
/// Once announced, `BusyChanged(true)` has been published and dropping the
/// guard publishes `BusyChanged(false)`, also when the owning future is
/// dropped mid-request.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
    events: &'a EventBus,
    announced: bool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to take the busy flag. Returns `Err` if already busy.
    pub(crate) fn acquire(
        flag: &'a AtomicBool,
        events: &'a EventBus,
    ) -> Result<Self, ConversationError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ConversationError::Busy);
        }
        Ok(Self {
            flag,
            events,
            announced: false,
        })
    }

    pub(crate) fn announce(&mut self) {
        if !self.announced {
            self.announced = true;
            self.events.publish(Event::BusyChanged(true));
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        if self.announced {
            self.events.publish(Event::BusyChanged(false));
        }
    }
}
