//! Durable key/value storage for the history

use crate::error::HistoryError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Key/value storage holding serialized history
pub trait HistoryBackend: Send {
    /// Read the value stored under `key`; `None` when nothing was stored yet
    fn load(&self, key: &str) -> Result<Option<String>, HistoryError>;

    /// Replace the value stored under `key`
    fn save(&self, key: &str, value: &str) -> Result<(), HistoryError>;
}

/// One JSON file per key inside a directory
///
/// The directory is created on first save. Writes go to a temporary file
/// that is renamed over the target.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Store files under `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl HistoryBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), HistoryError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-process backend, shared between clones
///
/// Useful for tests: write failures can be switched on to exercise the
/// store's degrade-and-log path.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing the store
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    /// Raw value currently stored under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    /// Make every subsequent save fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl HistoryBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let values = self
            .values
            .lock()
            .map_err(|_| HistoryError::Backend("memory backend lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), HistoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(HistoryError::Backend("write refused".to_string()));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|_| HistoryError::Backend("memory backend lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
