//! Persona profiles: preamble, sampling, greeting and suggestion set.

use folio_common::{PersonaMode, Suggestion};

/// Reserved suggestion label that switches to the human-proxy persona.
pub const SWITCH_TO_HUMAN: &str = "switch-to-human";
/// Reserved suggestion label that switches back to the assistant persona.
pub const BACK_TO_ASSISTANT: &str = "back-to-assistant";

/// Appended once per session to an assistant reply after enough turns.
pub const CONTACT_POSTSCRIPT: &str = "\n\nIf you'd like to talk this through directly, \
     use the contact form or tap \"Talk to a human\" below.";

const ASSISTANT_PREAMBLE: &str = "You are the assistant on a personal portfolio website. \
     Answer questions about the owner's skills, projects and experience. \
     Keep replies short, friendly and factual. If you do not know something, \
     say so and suggest using the contact form.";

const HUMAN_PREAMBLE: &str = "You are speaking on behalf of the portfolio owner, in the \
     first person, in a relaxed conversational tone. Keep replies brief. Never invent \
     commitments, prices or availability; point to the contact form for those.";

/// Everything that differs between the two personas.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonaProfile {
    pub mode: PersonaMode,
    pub display_name: String,
    pub preamble: String,
    pub greeting: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
    pub suggestions: Vec<Suggestion>,
}

impl PersonaProfile {
    pub fn assistant() -> Self {
        Self {
            mode: PersonaMode::Assistant,
            display_name: "Assistant".to_string(),
            preamble: ASSISTANT_PREAMBLE.to_string(),
            greeting: "Hi! I'm the assistant for this portfolio. Ask me about skills, \
                       projects or how to get in touch."
                .to_string(),
            temperature: 0.7,
            max_tokens: 200,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
            suggestions: vec![
                Suggestion::new("Tell me about your skills", "Skills"),
                Suggestion::new("What projects have you built?", "Projects"),
                Suggestion::new("How can I contact you?", "Contact"),
                Suggestion::new(SWITCH_TO_HUMAN, "Talk to a human"),
            ],
        }
    }

    pub fn human_proxy() -> Self {
        Self {
            mode: PersonaMode::HumanProxy,
            display_name: "Owner".to_string(),
            preamble: HUMAN_PREAMBLE.to_string(),
            greeting: "Hey, thanks for stopping by! What would you like to chat about?"
                .to_string(),
            temperature: 0.85,
            max_tokens: 300,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
            suggestions: vec![
                Suggestion::new("What are you working on right now?", "Current work"),
                Suggestion::new("Are you open to new opportunities?", "Availability"),
                Suggestion::new(BACK_TO_ASSISTANT, "Back to assistant"),
            ],
        }
    }

    /// Built-in profile for `mode`.
    pub fn for_mode(mode: PersonaMode) -> Self {
        match mode {
            PersonaMode::Assistant => Self::assistant(),
            PersonaMode::HumanProxy => Self::human_proxy(),
        }
    }

    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    /// Whether this persona appends the contact postscript.
    pub fn offers_contact(&self) -> bool {
        self.mode == PersonaMode::Assistant
    }
}
