use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Durable key-value storage for the persisted session.
///
/// Implementations never surface I/O failures: a corrupt or inaccessible
/// store degrades to "nothing persisted", logged via `tracing`.
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;
    /// Write `value` under `key`, replacing any previous value.
    fn store(&self, key: &str, value: &str);
    /// Remove the value stored under `key`.
    fn remove(&self, key: &str);
}

/// In-process storage; state is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// File-backed storage: one JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                warn!(key, error = %err, "Failed to restore session");
                None
            }
        }
    }

    fn store(&self, key: &str, value: &str) {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            warn!(key, error = %err, "Failed to persist session");
            return;
        }
        if let Err(err) = std::fs::write(self.path_for(key), value) {
            warn!(key, error = %err, "Failed to persist session");
        }
    }

    fn remove(&self, key: &str) {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!(key, error = %err, "Failed to clear persisted session"),
        }
    }
}
