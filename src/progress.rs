//! Persisted "found" state
//!
//! The quiz stores, under a string key, the numbers of the movies already
//! guessed. Storage is injected through [`ProgressStore`] so the session
//! does not care where the numbers live.

use ahash::AHashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by progress stores
#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a JSON object of number arrays
    #[error("Corrupt progress file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key-value capability holding found movie numbers.
pub trait ProgressStore: Send + Sync {
    /// Numbers stored under `key`; an unknown key yields an empty list.
    fn load(&self, key: &str) -> Result<Vec<u32>, ProgressError>;

    /// Replace the numbers stored under `key`.
    fn save(&self, key: &str, numbers: &[u32]) -> Result<(), ProgressError>;
}

impl<T: ProgressStore + ?Sized> ProgressStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Vec<u32>, ProgressError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, numbers: &[u32]) -> Result<(), ProgressError> {
        (**self).save(key, numbers)
    }
}

/// In-process store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<AHashMap<String, Vec<u32>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Vec<u32>, ProgressError> {
        Ok(self.inner.read().get(key).cloned().unwrap_or_default())
    }

    fn save(&self, key: &str, numbers: &[u32]) -> Result<(), ProgressError> {
        self.inner.write().insert(key.to_string(), numbers.to_vec());
        Ok(())
    }
}

/// JSON file store: `{ "movies": [1, 4, 7] }`.
///
/// Saves go through a temp file renamed over the target, so a crash mid-write
/// leaves the previous file intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> ProgressError {
        ProgressError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, Vec<u32>>, ProgressError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|source| ProgressError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, data: &BTreeMap<String, Vec<u32>>) -> Result<(), ProgressError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(data)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Vec<u32>, ProgressError> {
        Ok(self.read_all()?.remove(key).unwrap_or_default())
    }

    fn save(&self, key: &str, numbers: &[u32]) -> Result<(), ProgressError> {
        let _guard = self.write_lock.lock();
        let mut data = self.read_all()?;
        data.insert(key.to_string(), numbers.to_vec());
        self.write_all(&data)?;
        tracing::debug!(path = %self.path.display(), key, count = numbers.len(), "saved progress");
        Ok(())
    }
}
