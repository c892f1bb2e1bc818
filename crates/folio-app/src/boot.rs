//! Wiring: map the loaded config onto the assistant engine.

use std::sync::Arc;
use std::time::Duration;

use folio_assistant::{
    CompletionClient, CompletionConfig, ConversationManager, ConversationSettings,
    CredentialResolver, DevResource, FilePreferenceStore, HttpTransport, PersonaProfile,
    Preferences, ResolverSettings,
};
use folio_config::schema::{AssistantConfig, CredentialsConfig, PersonaConfig, PreferencesConfig};
use folio_config::FolioConfig;

/// Dev key file tried when the config names none.
const DEFAULT_DEV_FILE: &str = ".env";

pub fn open_preferences(config: &PreferencesConfig) -> Preferences {
    let store = match config.path {
        Some(ref path) => FilePreferenceStore::open(path),
        None => FilePreferenceStore::open_default(),
    };
    if !store.is_available() {
        tracing::warn!("Preferences will not be saved this session");
    }
    Preferences::new(Arc::new(store))
}

pub fn resolver_settings(config: &CredentialsConfig) -> ResolverSettings {
    let dev_resource = match (&config.dev_file, &config.dev_url) {
        (Some(path), _) => DevResource::File(path.clone()),
        (None, Some(url)) => DevResource::Url(url.clone()),
        (None, None) => DevResource::File(DEFAULT_DEV_FILE.into()),
    };
    ResolverSettings::default()
        .with_key_name(config.key_name.clone())
        .with_dev_resource(dev_resource)
        .with_embedded_fragments(config.embedded_fragments.clone())
}

pub fn completion_config(config: &AssistantConfig) -> CompletionConfig {
    CompletionConfig::default()
        .with_endpoint(config.endpoint.clone())
        .with_model(config.model.clone())
        .with_timeout(Duration::from_secs(u64::from(config.request_timeout_secs)))
}

pub fn conversation_settings(config: &AssistantConfig) -> ConversationSettings {
    ConversationSettings::default()
        .with_history_limit(config.history_limit as usize)
        .with_contact_threshold(config.contact_threshold)
        .with_typing_delay(Duration::from_millis(u64::from(config.typing_delay_ms)))
}

/// Apply whichever overrides are set on top of a built-in profile.
pub fn persona_profile(base: PersonaProfile, overrides: &PersonaConfig) -> PersonaProfile {
    let mut profile = base;
    if let Some(ref preamble) = overrides.preamble {
        profile = profile.with_preamble(preamble.clone());
    }
    if let Some(t) = overrides.temperature {
        profile = profile.with_temperature(t);
    }
    if let Some(n) = overrides.max_tokens {
        profile = profile.with_max_tokens(n);
    }
    if let Some(p) = overrides.top_p {
        profile = profile.with_top_p(p);
    }
    if let Some(p) = overrides.frequency_penalty {
        profile = profile.with_frequency_penalty(p);
    }
    if let Some(p) = overrides.presence_penalty {
        profile = profile.with_presence_penalty(p);
    }
    profile
}

/// Credential chain for this session, backed by the preference store.
pub fn credential_resolver(
    config: &CredentialsConfig,
    preferences: Preferences,
) -> Arc<CredentialResolver> {
    Arc::new(CredentialResolver::new(preferences, resolver_settings(config)))
}

/// Build the conversation for one terminal session.
pub fn build_conversation(
    config: &FolioConfig,
    credentials: Arc<CredentialResolver>,
) -> ConversationManager {
    let completion = completion_config(&config.assistant);
    let transport = Arc::new(HttpTransport::new(completion.endpoint.clone()));
    let client = CompletionClient::new(completion, transport, credentials);

    ConversationManager::new(client, conversation_settings(&config.assistant)).with_profiles(
        persona_profile(PersonaProfile::assistant(), &config.persona.assistant),
        persona_profile(PersonaProfile::human_proxy(), &config.persona.human),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_assistant::Theme;

    #[test]
    fn unset_overrides_keep_builtin_profile() {
        let profile = persona_profile(PersonaProfile::human_proxy(), &PersonaConfig::default());
        assert_eq!(profile, PersonaProfile::human_proxy());
    }

    #[test]
    fn overrides_replace_only_set_fields() {
        let overrides = PersonaConfig {
            temperature: Some(0.4),
            preamble: Some("Be terse.".into()),
            ..PersonaConfig::default()
        };
        let profile = persona_profile(PersonaProfile::assistant(), &overrides);
        assert!((profile.temperature - 0.4).abs() < f64::EPSILON);
        assert_eq!(profile.preamble, "Be terse.");
        assert_eq!(profile.max_tokens, PersonaProfile::assistant().max_tokens);
        assert_eq!(profile.top_p, None);
    }

    #[test]
    fn dev_file_preferred_over_dev_url() {
        let config = CredentialsConfig {
            dev_file: Some("local.env".into()),
            dev_url: Some("http://localhost:8000/.env".into()),
            ..CredentialsConfig::default()
        };
        let settings = resolver_settings(&config);
        assert_eq!(settings.dev_resource, Some(DevResource::File("local.env".into())));
        assert_eq!(settings.key_name, "GROQ_API_KEY");
    }

    #[test]
    fn dev_file_defaults_to_dotenv() {
        let settings = resolver_settings(&CredentialsConfig::default());
        assert_eq!(settings.dev_resource, Some(DevResource::File(".env".into())));
    }

    #[test]
    fn assistant_section_maps_to_settings() {
        let config = AssistantConfig {
            history_limit: 6,
            request_timeout_secs: 20,
            typing_delay_ms: 0,
            ..AssistantConfig::default()
        };
        let conversation = conversation_settings(&config);
        assert_eq!(conversation.history_limit, 6);
        assert_eq!(conversation.contact_threshold, 3);
        assert_eq!(conversation.typing_delay, Duration::ZERO);

        let completion = completion_config(&config);
        assert_eq!(completion.timeout, Duration::from_secs(20));
        assert_eq!(completion.model, "llama-3.1-8b-instant");
    }

    #[test]
    fn preferences_open_at_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = PreferencesConfig {
            path: Some(dir.path().join("prefs.json")),
        };
        let prefs = open_preferences(&config);
        prefs.set_theme(Theme::Dark);
        assert_eq!(open_preferences(&config).theme(), Theme::Dark);
    }

    #[test]
    fn built_conversation_uses_configured_profiles() {
        let mut config = FolioConfig::default();
        config.persona.human.max_tokens = Some(128);
        let dir = tempfile::tempdir().unwrap();
        let prefs = open_preferences(&PreferencesConfig {
            path: Some(dir.path().join("prefs.json")),
        });

        let manager = build_conversation(&config, credential_resolver(&config.credentials, prefs));
        manager
            .switch_persona(folio_common::PersonaMode::HumanProxy)
            .unwrap();
        assert_eq!(manager.profile().max_tokens, 128);
        assert_eq!(manager.settings().history_limit, 10);
    }

    #[tokio::test]
    async fn cli_key_survives_corrupt_preferences_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ truncated").unwrap();
        let config = PreferencesConfig { path: Some(path.clone()) };
        let credentials = CredentialsConfig {
            dev_file: Some(dir.path().join("missing.env")),
            ..CredentialsConfig::default()
        };

        let prefs = open_preferences(&config);
        prefs.set_theme(Theme::Dark);
        let resolver = credential_resolver(&credentials, prefs.clone());
        resolver.remember_override("gsk_from_cli");

        assert_eq!(resolver.resolve().await.unwrap().expose(), "gsk_from_cli");
        assert_eq!(prefs.theme(), Theme::Dark);
        let reopened = open_preferences(&config);
        assert_eq!(reopened.credential_override().as_deref(), Some("gsk_from_cli"));
    }

    #[tokio::test]
    async fn cli_key_applies_when_preferences_are_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "file").unwrap();
        let prefs = open_preferences(&PreferencesConfig {
            path: Some(blocker.join("prefs.json")),
        });
        let credentials = CredentialsConfig {
            dev_file: Some(dir.path().join("missing.env")),
            ..CredentialsConfig::default()
        };

        let resolver = credential_resolver(&credentials, prefs);
        resolver.remember_override("gsk_from_cli");
        assert_eq!(resolver.resolve().await.unwrap().expose(), "gsk_from_cli");
    }
}
