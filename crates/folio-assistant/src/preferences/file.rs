//! JSON-file backed preference store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use folio_common::StoreError;
use tracing::{debug, warn};

use super::PreferenceStore;

const APP_NAME: &str = "folio";
const FILE_NAME: &str = "preferences.json";

/// Preferences persisted as one flat JSON object.
///
/// The file is read once on open and rewritten on every `set` through a
/// sibling temp file. A file that does not parse is treated as empty and
/// replaced by the next `set`. If it cannot be read, or its directory cannot
/// be created, the store opens unavailable and behaves as permanently empty.
pub struct FilePreferenceStore {
    path: PathBuf,
    values: Option<Mutex<BTreeMap<String, String>>>,
}

impl FilePreferenceStore {
    /// Open the store at `path`. Never fails.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match load(&path) {
            Ok(values) => {
                debug!(path = %path.display(), entries = values.len(), "preferences loaded");
                Self {
                    path,
                    values: Some(Mutex::new(values)),
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "preferences unavailable, using no-op store");
                Self::unavailable(path)
            }
        }
    }

    /// Open the store at the platform data directory.
    pub fn open_default() -> Self {
        match default_path() {
            Some(path) => Self::open(path),
            None => {
                warn!("could not determine data directory, preferences disabled");
                Self::unavailable(PathBuf::new())
            }
        }
    }

    fn unavailable(path: PathBuf) -> Self {
        Self { path, values: None }
    }

    pub fn is_available(&self) -> bool {
        self.values.is_some()
    }
}

/// `data_dir()/folio/preferences.json`.
fn default_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_NAME).join(FILE_NAME))
}

fn load(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    match serde_json::from_str(&content) {
        Ok(values) => Ok(values),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "preferences file is corrupt, starting empty");
            Ok(BTreeMap::new())
        }
    }
}

fn persist(path: &Path, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(values)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.as_ref()?.lock().ok()?;
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(values) = self.values.as_ref() else {
            return;
        };
        let Ok(mut values) = values.lock() else {
            return;
        };
        values.insert(key.to_string(), value.to_string());
        if let Err(e) = persist(&self.path, &values) {
            warn!(path = %self.path.display(), error = %e, "failed to persist preferences");
        }
    }
}
