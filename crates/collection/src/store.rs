//! Collection store — CRUD over the persisted bookmark list.
//!
//! The storage backend is injected so the store can be faked in tests and
//! swapped for a different persistence mechanism without touching the CRUD
//! logic.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::CollectionError;
use crate::types::CollectionEntry;

/// Abstract storage slot holding one serialized collection.
pub trait StorageBackend: Send + Sync {
    /// Reads the raw serialized collection. `None` when nothing is stored yet.
    fn read(&self) -> Result<Option<String>, CollectionError>;

    /// Replaces the stored collection with `data`.
    fn write(&self, data: &str) -> Result<(), CollectionError>;
}

/// File-backed storage: one JSON file, parent directories created on write.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, CollectionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn write(&self, data: &str) -> Result<(), CollectionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

/// Returns the default collection file path.
pub fn default_collection_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("gtrack").join("collection.json"))
}

/// The user's game collection.
///
/// Every operation performs a full read (and, for mutations, write) of the
/// serialized collection. Mutations only persist when they changed
/// something.
pub struct CollectionStore {
    backend: Box<dyn StorageBackend>,
}

impl CollectionStore {
    /// Creates a store over an injected backend.
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Creates a file-backed store at the default path.
    pub fn open_default() -> Result<Self, CollectionError> {
        let path = default_collection_path().ok_or(CollectionError::NoStoragePath)?;
        Ok(Self::new(Box::new(FileBackend::new(path))))
    }

    /// Returns all entries in insertion order.
    ///
    /// An absent store reads as an empty collection. So does a stored value
    /// that no longer parses: the corruption is logged and the collection
    /// heals on the next successful write.
    pub fn entries(&self) -> Result<Vec<CollectionEntry>, CollectionError> {
        let Some(raw) = self.backend.read()? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(error = %e, "stored collection is not valid JSON, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Adds a game to the collection.
    ///
    /// Idempotent by `id`: returns `false` without writing when an entry
    /// with the same id is already present.
    pub fn add(&self, entry: CollectionEntry) -> Result<bool, CollectionError> {
        let mut entries = self.entries()?;
        if entries.iter().any(|e| e.id == entry.id) {
            debug!(id = entry.id, name = %entry.name, "game already in collection");
            return Ok(false);
        }
        debug!(id = entry.id, name = %entry.name, "adding game to collection");
        entries.push(entry);
        self.persist(&entries)?;
        Ok(true)
    }

    /// Removes a game by id.
    ///
    /// Returns `false` without writing when no entry matched.
    pub fn remove(&self, id: i64) -> Result<bool, CollectionError> {
        let mut entries = self.entries()?;
        let len_before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == len_before {
            debug!(id, "game not in collection, nothing to remove");
            return Ok(false);
        }
        debug!(id, "removed game from collection");
        self.persist(&entries)?;
        Ok(true)
    }

    /// Whether a game with `id` is in the collection.
    pub fn contains(&self, id: i64) -> Result<bool, CollectionError> {
        Ok(self.entries()?.iter().any(|e| e.id == id))
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> Result<usize, CollectionError> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CollectionError> {
        Ok(self.entries()?.is_empty())
    }

    fn persist(&self, entries: &[CollectionEntry]) -> Result<(), CollectionError> {
        let json = serde_json::to_string_pretty(entries)?;
        self.backend.write(&json)
    }
}

/// Returns the platform-specific config directory.
fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(".config"))
    }
}
