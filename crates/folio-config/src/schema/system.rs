//! System configuration types: preferences location and logging.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Preference store settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Overrides the default `preferences.json` location.
    pub path: Option<PathBuf>,
}

/// Log level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing_subscriber` filter directive for the folio crates.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "folio=debug",
            LogLevel::Info => "folio=info",
            LogLevel::Warning => "folio=warn",
            LogLevel::Error => "folio=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
