//! Persistent key-value preferences.
//!
//! Stores never fail towards their callers: when the backing storage is
//! unavailable every `get` is absent and every `set` is a no-op.

mod file;
mod memory;


use std::fmt;
use std::sync::Arc;

pub use file::FilePreferenceStore;
pub use memory::MemoryPreferenceStore;

/// Key holding the theme flag.
pub const THEME_KEY: &str = "theme";
/// Key holding a user-supplied completion credential.
pub const CREDENTIAL_KEY: &str = "completion_api_key";

/// Flat string key-value store.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Page colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Unknown values read as the default.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed accessors over a raw store.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .map(|v| Theme::parse(&v))
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str());
    }

    /// Blank values count as absent.
    pub fn credential_override(&self) -> Option<String> {
        self.store
            .get(CREDENTIAL_KEY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn set_credential_override(&self, value: &str) {
        self.store.set(CREDENTIAL_KEY, value.trim());
    }
}
