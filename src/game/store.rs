//! Key/value persistence backends
//!
//! `FileStore` writes one JSON file per key with an atomic temp-file rename.
//! `MemoryStore` keeps everything in process and backs `--no-save` and tests.

use rustc_hash::FxHashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::instrument;

use super::record::day_key_prefix;

/// Error type for storage failures
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "storage I/O on {}: {source}", path.display()),
            Self::Encode(e) => write!(f, "failed to encode record: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}

/// String key/value storage
pub trait Store {
    /// Read a value; `Ok(None)` when the key was never written
    ///
    /// # Errors
    /// Returns `StoreError` when the backend is unavailable.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    /// Returns `StoreError` when the backend is unavailable.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key under a data directory
///
/// Day records live in `days/`, everything else at the top level.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the directory cannot be created.
    #[instrument]
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root).map_err(|source| StoreError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        tracing::debug!(root = %root.display(), "opened file store");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path backing `key`
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file = format!("{key}.json");
        if key.starts_with(&day_key_prefix()) {
            self.root.join("days").join(file)
        } else {
            self.root.join(file)
        }
    }
}

impl Store for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    #[instrument(skip(self, value))]
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        atomic_write(&path, value.as_bytes())
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .ok_or_else(|| io_err(io::Error::other("path has no parent directory")))?;
    fs::create_dir_all(dir).map_err(io_err)?;

    let temp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    fs::write(temp.path(), data).map_err(io_err)?;
    temp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
