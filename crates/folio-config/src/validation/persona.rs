//! Persona override validation.

use crate::schema::PersonaConfig;

use super::helpers::{validate_range, validate_range_f64};

/// Validate whichever overrides are set for one persona.
pub(crate) fn validate_persona(errors: &mut Vec<String>, section: &str, persona: &PersonaConfig) {
    if let Some(t) = persona.temperature {
        validate_range_f64(errors, &format!("{section}.temperature"), t, 0.0, 2.0);
    }
    if let Some(n) = persona.max_tokens {
        validate_range(errors, &format!("{section}.max_tokens"), n, 16, 4096);
    }
    if let Some(p) = persona.top_p {
        validate_range_f64(errors, &format!("{section}.top_p"), p, 0.0, 1.0);
    }
    if let Some(p) = persona.frequency_penalty {
        validate_range_f64(errors, &format!("{section}.frequency_penalty"), p, -2.0, 2.0);
    }
    if let Some(p) = persona.presence_penalty {
        validate_range_f64(errors, &format!("{section}.presence_penalty"), p, -2.0, 2.0);
    }
    if matches!(persona.preamble, Some(ref p) if p.trim().is_empty()) {
        errors.push(format!("{section}.preamble must not be blank"));
    }
}
