//! Where the completion credential may come from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Credential resolution settings.
///
/// `embedded_fragments` are Base64 pieces joined into a default key. Anything
/// placed there ships with the binary and is readable by anyone who has it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Key looked up in the development file (`KEY=value` lines).
    pub key_name: String,
    pub dev_file: Option<PathBuf>,
    /// Only consulted when the host is local.
    pub dev_url: Option<String>,
    pub embedded_fragments: Vec<String>,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            key_name: "GROQ_API_KEY".into(),
            dev_file: None,
            dev_url: None,
            embedded_fragments: Vec::new(),
        }
    }
}
