//! File-backed session store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::SessionStore;

/// Session store persisted as a single JSON object on disk.
///
/// Loaded once on open; every `set`/`remove` rewrites the file (write-through,
/// no batching). An unreadable or corrupt file yields an empty session rather
/// than an error, per the recovery policy for persisted records.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open a session file, creating an empty session if it does not exist
    /// or cannot be decoded.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load(&path);
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn flush(&self, values: &BTreeMap<String, String>) {
        let encoded = match serde_json::to_string_pretty(values) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode session file");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, encoded) {
            // The in-memory session stays usable; persistence resumes on the
            // next successful write.
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write session file");
        }
    }
}

fn load(path: &Path) -> BTreeMap<String, String> {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt session file, starting empty");
            BTreeMap::new()
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self
            .values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        self.flush(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self
            .values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if values.remove(key).is_some() {
            self.flush(&values);
        }
    }
}
