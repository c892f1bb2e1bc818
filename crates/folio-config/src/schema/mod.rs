//! Configuration schema types for Folio.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod assistant;
mod credentials;
mod persona;
mod system;

pub use assistant::*;
pub use credentials::*;
pub use persona::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Folio.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FolioConfig {
    pub assistant: AssistantConfig,
    pub persona: PersonasConfig,
    pub credentials: CredentialsConfig,
    pub preferences: PreferencesConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_assistant_section() {
        let config = FolioConfig::default();
        assert_eq!(
            config.assistant.endpoint,
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(config.assistant.model, "llama-3.1-8b-instant");
        assert_eq!(config.assistant.history_limit, 10);
        assert_eq!(config.assistant.contact_threshold, 3);
        assert_eq!(config.assistant.request_timeout_secs, 15);
        assert_eq!(config.assistant.typing_delay_ms, 600);
    }

    #[test]
    fn default_personas_have_no_overrides() {
        let config = FolioConfig::default();
        assert_eq!(config.persona.assistant, PersonaConfig::default());
        assert_eq!(config.persona.human, PersonaConfig::default());
    }

    #[test]
    fn default_credentials_have_no_embedded_key() {
        let config = FolioConfig::default();
        assert_eq!(config.credentials.key_name, "GROQ_API_KEY");
        assert!(config.credentials.embedded_fragments.is_empty());
        assert!(config.credentials.dev_file.is_none());
        assert!(config.credentials.dev_url.is_none());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: FolioConfig = toml::from_str(
            r#"
[assistant]
model = "mixtral-8x7b"

[persona.human]
temperature = 0.9
preamble = "Speak as Sam."
"#,
        )
        .unwrap();
        assert_eq!(config.assistant.model, "mixtral-8x7b");
        assert_eq!(config.assistant.history_limit, 10);
        assert_eq!(config.persona.human.temperature, Some(0.9));
        assert_eq!(config.persona.human.max_tokens, None);
        assert_eq!(config.persona.human.preamble.as_deref(), Some("Speak as Sam."));
        assert_eq!(config.persona.assistant.temperature, None);
    }

    #[test]
    fn log_level_parses_uppercase() {
        let config: FolioConfig = toml::from_str("[logging]\nlevel = \"DEBUG\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.level.directive(), "folio=debug");
    }
}
