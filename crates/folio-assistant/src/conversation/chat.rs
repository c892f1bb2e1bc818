//! Async chat methods for ConversationManager (submit + suggestions).

use std::sync::PoisonError;

use folio_common::{Event, PersonaMode, Turn};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::persona::{BACK_TO_ASSISTANT, CONTACT_POSTSCRIPT, SWITCH_TO_HUMAN};

use super::manager::ConversationManager;
use super::types::{BusyGuard, ConversationError};

impl ConversationManager {
    /// Send a user message and wait for the reply.
    ///
    /// Publishes, in order: the user turn, `BusyChanged(true)`, the
    /// assistant turn, `BusyChanged(false)`. Rejected with
    /// [`ConversationError::Busy`] while another reply is pending.
    pub async fn submit(&self, text: impl Into<String>) -> Result<Turn, ConversationError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(ConversationError::EmptyMessage);
        }

        let (mut guard, cancel) = self.begin_request()?;

        let user_turn = Turn::user(text);
        let (history, mode) = {
            let mut state = self.lock_state();
            state.push(user_turn.clone(), self.settings.history_limit);
            let history: Vec<Turn> = state.history.iter().cloned().collect();
            (history, state.persona)
        };
        self.events.publish(Event::MessageAppended(user_turn));
        guard.announce();

        let profile = self.profile_for(mode);
        debug!(conversation = %self.id, persona = %mode, turns = history.len(), "awaiting reply");

        let (completion, ()) = tokio::join!(
            self.client.complete_with_cancel(&history, profile, &cancel),
            tokio::time::sleep(self.settings.typing_delay),
        );

        let reply = {
            let mut state = self.lock_state();
            let mut content = completion.text().to_string();
            if completion.is_live()
                && profile.offers_contact()
                && !state.contact_offered
                && state.turn_count >= self.settings.contact_threshold
            {
                content.push_str(CONTACT_POSTSCRIPT);
                state.contact_offered = true;
            }
            let reply = Turn::assistant(content);
            state.push(reply.clone(), self.settings.history_limit);
            state.turn_count += 1;
            reply
        };
        self.events.publish(Event::MessageAppended(reply.clone()));

        drop(guard);
        Ok(reply)
    }

    /// Act on a tapped suggestion. Reserved labels switch persona without
    /// calling the endpoint; anything else is submitted as a message.
    pub async fn select_suggestion(&self, label: &str) -> Result<Turn, ConversationError> {
        match label {
            SWITCH_TO_HUMAN => self.switch_persona(PersonaMode::HumanProxy),
            BACK_TO_ASSISTANT => self.switch_persona(PersonaMode::Assistant),
            _ => self.submit(label).await,
        }
    }

    /// Take the busy flag and install a fresh cancel token as one step, so a
    /// `cancel_pending` that sees the manager busy always reaches this request.
    fn begin_request(&self) -> Result<(BusyGuard<'_>, CancellationToken), ConversationError> {
        let mut slot = self.cancel.lock().unwrap_or_else(PoisonError::into_inner);
        let guard = BusyGuard::acquire(&self.busy, &self.events)?;
        let token = CancellationToken::new();
        *slot = token.clone();
        Ok((guard, token))
    }
}
