//! Folio configuration system.
//!
//! TOML-based configuration for the portfolio assistant. All config
//! sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use folio_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::FolioConfig;

use std::path::Path;

use folio_common::ConfigError;

/// Load config from the platform default path, creating it if missing,
/// and validate the result.
pub fn load_config() -> Result<FolioConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate the result.
///
/// Unlike [`load_config`], a missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<FolioConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &FolioConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&FolioConfig::default());
        assert!(json.contains("\"assistant\""));
        assert!(json.contains("\"persona\""));
        assert!(json.contains("\"credentials\""));
        assert!(json.contains("\"preferences\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn out_of_range_values_fail_only_in_validated_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[assistant]\ntyping_delay_ms = 60000\n").unwrap();

        let raw = toml_loader::load_from_path(&path).unwrap();
        assert_eq!(raw.assistant.typing_delay_ms, 60000);

        let err = load_config_from(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError(ref msg) if msg.contains("typing_delay_ms"))
        );
    }

    #[test]
    fn load_config_from_missing_path_is_file_not_found() {
        let err = load_config_from(Path::new("/tmp/folio_definitely_missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[assistant]\nhistory_limit = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("assistant.history_limit"));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&FolioConfig::default());
        let parsed: FolioConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.assistant.history_limit, 10);
        assert_eq!(parsed.credentials.key_name, "GROQ_API_KEY");
    }
}
