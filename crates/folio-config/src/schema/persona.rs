//! Per-persona overrides.
//!
//! Every field is optional; unset fields keep the built-in profile of the
//! persona (assistant: temperature 0.7, 200 tokens; human: 0.85, 300 tokens).

use serde::{Deserialize, Serialize};

/// Sampling and preamble overrides for one persona.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PersonaConfig {
    /// Valid range: 0.0-2.0.
    pub temperature: Option<f64>,
    /// Valid range: 16-4096.
    pub max_tokens: Option<u32>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
    /// Replaces the built-in instruction preamble.
    pub preamble: Option<String>,
}

/// Both personas.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersonasConfig {
    pub assistant: PersonaConfig,
    pub human: PersonaConfig,
}
