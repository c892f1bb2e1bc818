//! Local development key file (`KEY=value` lines).

use std::path::PathBuf;

use reqwest::Url;

/// Where the development key file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevResource {
    /// A file on this machine.
    File(PathBuf),
    /// A same-origin URL; only fetched when its host is local.
    Url(String),
}

impl DevResource {
    pub fn is_local(&self) -> bool {
        match self {
            DevResource::File(_) => true,
            DevResource::Url(url) => Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(is_local_host))
                .unwrap_or(false),
        }
    }
}

/// Hosts treated as a development machine.
pub fn is_local_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    matches!(host, "localhost" | "127.0.0.1" | "::1") || host.ends_with(".local")
}

/// Value of the first `key=value` line whose key matches, trimmed and
/// unquoted. Blank values count as missing.
pub fn parse_key_value(contents: &str, key: &str) -> Option<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|v| !v.is_empty())
}
