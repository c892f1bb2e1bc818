//! Assistant and credential section validation.

use crate::schema::FolioConfig;

use super::helpers::{validate_http_url, validate_range};

/// Validate endpoint, model and conversation tuning.
pub(crate) fn validate_assistant(errors: &mut Vec<String>, config: &FolioConfig) {
    let assistant = &config.assistant;
    validate_http_url(errors, "assistant.endpoint", &assistant.endpoint);
    if assistant.model.trim().is_empty() {
        errors.push("assistant.model must not be empty".into());
    }
    validate_range(errors, "assistant.history_limit", assistant.history_limit, 2, 50);
    validate_range(
        errors,
        "assistant.contact_threshold",
        assistant.contact_threshold,
        1,
        20,
    );
    validate_range(
        errors,
        "assistant.request_timeout_secs",
        assistant.request_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "assistant.typing_delay_ms",
        assistant.typing_delay_ms,
        0,
        5000,
    );
}

/// Validate credential sources.
pub(crate) fn validate_credentials(errors: &mut Vec<String>, config: &FolioConfig) {
    let credentials = &config.credentials;
    if credentials.key_name.trim().is_empty() || credentials.key_name.contains('=') {
        errors.push(format!(
            "credentials.key_name = {:?} must be a non-empty name without '='",
            credentials.key_name
        ));
    }
    if let Some(ref url) = credentials.dev_url {
        validate_http_url(errors, "credentials.dev_url", url);
    }
}
