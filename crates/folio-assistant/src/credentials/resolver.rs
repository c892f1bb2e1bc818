//! Ordered credential fallback chain with a once-per-session cache.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::preferences::Preferences;

use super::credential::Credential;
use super::dev_resource::{parse_key_value, DevResource};
use super::embedded::decode_fragments;

/// Where the resolver may look beyond the preference store.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub key_name: String,
    pub dev_resource: Option<DevResource>,
    pub embedded_fragments: Vec<String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            key_name: "GROQ_API_KEY".to_string(),
            dev_resource: None,
            embedded_fragments: Vec::new(),
        }
    }
}

impl ResolverSettings {
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    pub fn with_dev_resource(mut self, resource: DevResource) -> Self {
        self.dev_resource = Some(resource);
        self
    }

    pub fn with_embedded_fragments(mut self, fragments: Vec<String>) -> Self {
        self.embedded_fragments = fragments;
        self
    }
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Resolves the completion credential once and remembers the outcome,
/// including "none found", for the rest of the session.
pub struct CredentialResolver {
    preferences: Preferences,
    settings: ResolverSettings,
    http: reqwest::Client,
    session_override: Mutex<Option<Credential>>,
    cached: OnceCell<Option<Credential>>,
}

impl CredentialResolver {
    pub fn new(preferences: Preferences, settings: ResolverSettings) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            preferences,
            settings,
            http,
            session_override: Mutex::new(None),
            cached: OnceCell::new(),
        }
    }

    /// Resolve (first call) or return the cached result. Never errors.
    pub async fn resolve(&self) -> Option<Credential> {
        self.cached
            .get_or_init(|| self.resolve_uncached())
            .await
            .clone()
    }

    /// Use a user-supplied credential ahead of the rest of the chain and keep
    /// it for future sessions. It applies to this session even when the store
    /// cannot persist it, as long as `resolve` has not run yet.
    pub fn remember_override(&self, value: &str) {
        let Some(credential) = Credential::new(value) else {
            return;
        };
        *self
            .session_override
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(credential);
        self.preferences.set_credential_override(value);
        if self.cached.initialized() {
            debug!("credential already resolved, override applies from the next session");
        }
    }

    async fn resolve_uncached(&self) -> Option<Credential> {
        let session = self
            .session_override
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(credential) = session
            .or_else(|| self.preferences.credential_override().and_then(Credential::new))
        {
            info!(source = "override", "credential resolved");
            return Some(credential);
        }

        if let Some(ref resource) = self.settings.dev_resource {
            if resource.is_local() {
                match self.read_dev_resource(resource).await {
                    Ok(contents) => {
                        if let Some(credential) =
                            parse_key_value(&contents, &self.settings.key_name)
                                .and_then(Credential::new)
                        {
                            info!(source = "dev-resource", "credential resolved");
                            return Some(credential);
                        }
                        debug!(key = %self.settings.key_name, "dev resource has no matching key");
                    }
                    Err(e) => debug!(error = %e, "dev resource unavailable"),
                }
            } else {
                debug!(?resource, "skipping dev resource on non-local host");
            }
        }

        if !self.settings.embedded_fragments.is_empty() {
            match decode_fragments(&self.settings.embedded_fragments).and_then(Credential::new) {
                Some(credential) => {
                    warn!(
                        source = "embedded",
                        "using embedded default credential; it is readable by anyone with this build"
                    );
                    return Some(credential);
                }
                None => debug!("embedded credential fragments did not decode"),
            }
        }

        warn!("no completion credential found, assistant will use fallback replies");
        None
    }

    async fn read_dev_resource(&self, resource: &DevResource) -> Result<String, FetchError> {
        match resource {
            DevResource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
            DevResource::Url(url) => {
                let response = self.http.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status));
                }
                Ok(response.text().await?)
            }
        }
    }
}
