//! ConversationManager struct, accessors and persona transitions.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use folio_common::{ConversationId, Event, EventBus, PersonaMode, Suggestion, Turn};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::completion::CompletionClient;
use crate::persona::PersonaProfile;

use super::types::{BusyGuard, ConversationError, ConversationSettings};

/// Mutable conversation state. Only touched under the manager's lock and
/// never held across an await.
#[derive(Debug, Default)]
pub(super) struct ConversationState {
    pub(super) history: VecDeque<Turn>,
    pub(super) persona: PersonaMode,
    pub(super) turn_count: u32,
    pub(super) contact_offered: bool,
}

impl ConversationState {
    /// Append and evict the oldest turns beyond `limit`.
    pub(super) fn push(&mut self, turn: Turn, limit: usize) {
        self.history.push_back(turn);
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }

    fn reset(&mut self, persona: PersonaMode) {
        self.history.clear();
        self.persona = persona;
        self.turn_count = 0;
        self.contact_offered = false;
    }
}

/// One assistant widget's conversation.
pub struct ConversationManager {
    pub(super) id: ConversationId,
    pub(super) client: CompletionClient,
    pub(super) assistant: PersonaProfile,
    pub(super) human: PersonaProfile,
    pub(super) settings: ConversationSettings,
    pub(super) state: Mutex<ConversationState>,
    pub(super) busy: AtomicBool,
    pub(super) events: EventBus,
    pub(super) cancel: Mutex<CancellationToken>,
}

impl ConversationManager {
    pub fn new(client: CompletionClient, settings: ConversationSettings) -> Self {
        Self {
            id: ConversationId::new(),
            client,
            assistant: PersonaProfile::assistant(),
            human: PersonaProfile::human_proxy(),
            events: EventBus::new(settings.event_capacity),
            settings,
            state: Mutex::new(ConversationState::default()),
            busy: AtomicBool::new(false),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Replace the built-in persona profiles.
    pub fn with_profiles(mut self, assistant: PersonaProfile, human: PersonaProfile) -> Self {
        self.assistant = assistant;
        self.human = human;
        self
    }

    pub(super) fn lock_state(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn profile_for(&self, mode: PersonaMode) -> &PersonaProfile {
        match mode {
            PersonaMode::Assistant => &self.assistant,
            PersonaMode::HumanProxy => &self.human,
        }
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn settings(&self) -> &ConversationSettings {
        &self.settings
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn persona(&self) -> PersonaMode {
        self.lock_state().persona
    }

    /// Profile of the current persona.
    pub fn profile(&self) -> &PersonaProfile {
        self.profile_for(self.persona())
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.profile().suggestions.clone()
    }

    /// Snapshot of the retained history, oldest first.
    pub fn history(&self) -> Vec<Turn> {
        self.lock_state().history.iter().cloned().collect()
    }

    pub fn turn_count(&self) -> u32 {
        self.lock_state().turn_count
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Publish the current persona, its suggestions and its greeting, for a
    /// view that has just opened. History is left untouched.
    pub fn open(&self) -> Turn {
        let profile = self.profile();
        let greeting = Turn::assistant(profile.greeting.clone());
        self.events.publish(Event::PersonaChanged(profile.mode));
        self.events
            .publish(Event::SuggestionsChanged(profile.suggestions.clone()));
        self.events.publish(Event::MessageAppended(greeting.clone()));
        greeting
    }

    /// Switch persona: clears history, resets the turn counter and the
    /// contact postscript, swaps suggestions and emits the new greeting.
    ///
    /// The greeting is shown but not kept in history. Switching to the
    /// current persona restarts it the same way.
    pub fn switch_persona(&self, mode: PersonaMode) -> Result<Turn, ConversationError> {
        let _guard = BusyGuard::acquire(&self.busy, &self.events)?;

        let previous = {
            let mut state = self.lock_state();
            let previous = state.persona;
            state.reset(mode);
            previous
        };
        info!(conversation = %self.id, from = %previous, to = %mode, "persona switched");

        let profile = self.profile_for(mode);
        let greeting = Turn::assistant(profile.greeting.clone());
        self.events.publish(Event::PersonaChanged(mode));
        self.events
            .publish(Event::SuggestionsChanged(profile.suggestions.clone()));
        self.events.publish(Event::MessageAppended(greeting.clone()));
        Ok(greeting)
    }

    /// Abandon the in-flight request, if any. Its reply becomes the
    /// unavailable fallback.
    pub fn cancel_pending(&self) {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }
}
