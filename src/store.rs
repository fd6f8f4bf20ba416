//! Durable leaderboard storage
//!
//! The backing store is a single JSON file holding the ranked list. Writes go
//! through a uniquely-named temp file in the same directory followed by a
//! rename, so a concurrent reader sees either the old file or the new one,
//! never a partial write. A missing file is the empty-store case, not an
//! error; it is initialized on first load.
//!
//! `Store` is a trait so the ranking and service logic can be tested against
//! an in-memory fake without touching the filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;

use crate::entry::{Entry, now_ms};
use crate::rank;

/// Failures of the durable store. Missing files never surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure not explained by "file missing"
    #[error("leaderboard i/o failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The backing file exists but is not valid JSON
    #[error("corrupt leaderboard file at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load/persist interface for the ranked list.
///
/// `load` must return at most `cap` entries, in ranked order. `persist`
/// replaces the whole list atomically.
pub trait Store {
    fn load(&self, cap: usize) -> Result<Vec<Entry>, StoreError>;
    fn persist(&self, entries: &[Entry]) -> Result<(), StoreError>;
}

/// File-backed store at a fixed path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Unique sibling path for the in-flight write. A process-wide counter
    /// plus a random nonce keeps concurrent writers from colliding even
    /// before they reach the write guard.
    fn temp_path(&self) -> PathBuf {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        let nonce: u32 = rand::random();
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".tmp-{seq}-{nonce:08x}"));
        PathBuf::from(name)
    }
}

impl Store for FileStore {
    /// Read the ranked list, coercing malformed records and clamping to
    /// `cap`. A missing file initializes an empty store on disk and returns
    /// empty; the init write is atomic and idempotent, so it is safe without
    /// the write guard.
    fn load(&self, cap: usize) -> Result<Vec<Entry>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "no leaderboard at {}, initializing empty",
                    self.path.display()
                );
                self.persist(&[])?;
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let parsed: Value =
            serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        let Some(items) = parsed.as_array() else {
            log::warn!(
                "leaderboard file {} is not an array, treating as empty",
                self.path.display()
            );
            return Ok(Vec::new());
        };

        let now = now_ms();
        let entries: Vec<Entry> = items.iter().filter_map(|v| Entry::coerce(v, now)).collect();
        if entries.len() < items.len() {
            log::warn!(
                "dropped {} malformed leaderboard record(s) from {}",
                items.len() - entries.len(),
                self.path.display()
            );
        }

        Ok(rank::clamp_top(entries, cap))
    }

    /// Write the full list via temp file + rename. The target is never
    /// partially overwritten; on failure the temp file is removed
    /// best-effort and the target is left untouched.
    fn persist(&self, entries: &[Entry]) -> Result<(), StoreError> {
        self.ensure_parent_dir()?;
        let json = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.temp_path();
        if let Err(source) = fs::write(&tmp, &json) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Io { path: tmp, source });
        }
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }
}

/// In-memory store, for tests and previews. Same ranked-order and cap
/// contract as `FileStore`, minus the durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load(&self, cap: usize) -> Result<Vec<Entry>, StoreError> {
        Ok(rank::clamp_top(self.entries.lock().clone(), cap))
    }

    fn persist(&self, entries: &[Entry]) -> Result<(), StoreError> {
        *self.entries.lock() = entries.to_vec();
        Ok(())
    }
}
