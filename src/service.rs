//! Leaderboard service: read, qualify-check, submit
//!
//! Submissions are read-modify-write against the backing store: load, merge
//! the candidate, re-rank, clamp to cap, persist. Two unserialized writers
//! could both load the same list and the later persist would silently drop
//! the earlier one's entry, so the whole sequence runs under a mutex scoped
//! to the storage path. Plain reads take no lock; the missing-file recovery
//! write inside `load` is atomic and idempotent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use serde::Serialize;

use crate::config::Config;
use crate::entry::{Entry, now_ms};
use crate::error::LeaderboardError;
use crate::rank;
use crate::sanitize::sanitize;
use crate::store::{FileStore, Store};

/// Process-wide registry of write guards, one per storage path. Every
/// service instance opened on the same path shares the same mutex.
fn write_guard_for(path: &Path) -> Arc<Mutex<()>> {
    static GUARDS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();
    let registry = GUARDS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut map = registry.lock();
    map.entry(path.to_path_buf()).or_default().clone()
}

/// Fast-path qualification check.
///
/// Advisory only: concurrent submissions can move the floor between this
/// check and the guarded write, so the post-merge rank is authoritative.
pub fn qualifies(score: f64, current: &[Entry], cap: usize) -> bool {
    if !score.is_finite() || score < 0.0 {
        return false;
    }
    if current.len() < cap {
        return true;
    }
    // Equal to the floor does not qualify; strict improvement required
    match current.iter().map(|e| e.score).min() {
        Some(min) => score > min as f64,
        None => true,
    }
}

/// Current leaderboard contents, as served to the game client.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub entries: Vec<Entry>,
    pub cap: usize,
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    /// 1-based position in the final ranked list, or -1 if the entry was
    /// evicted during truncation despite passing the pre-check
    pub rank: i64,
    pub entries: Vec<Entry>,
    pub cap: usize,
}

/// Public operation surface over a durable store.
#[derive(Debug)]
pub struct Leaderboard<S> {
    store: S,
    cap: usize,
    guard: Arc<Mutex<()>>,
}

impl Leaderboard<FileStore> {
    /// Open the file-backed leaderboard described by `config`, sharing the
    /// write guard with any other instance on the same path.
    pub fn open(config: &Config) -> Self {
        let guard = write_guard_for(&config.path);
        Self {
            store: FileStore::new(config.path.clone()),
            cap: config.cap,
            guard,
        }
    }
}

impl<S: Store> Leaderboard<S> {
    /// Build a leaderboard over an arbitrary store with its own private
    /// write guard. Callers are responsible for not opening two services
    /// with distinct guards over the same underlying storage.
    pub fn with_store(store: S, cap: usize) -> Self {
        Self {
            store,
            cap,
            guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Read the current ranked list without writing (beyond the implicit
    /// empty-file initialization when the store is missing).
    pub fn read(&self) -> Result<Snapshot, LeaderboardError> {
        let entries = self.store.load(self.cap)?;
        Ok(Snapshot {
            entries,
            cap: self.cap,
        })
    }

    /// Submit a score. Validates, sanitizes, pre-checks qualification, then
    /// runs the guarded load-merge-clamp-persist cycle.
    pub fn submit(
        &self,
        raw_name: &str,
        raw_score: f64,
    ) -> Result<Submission, LeaderboardError> {
        if !raw_score.is_finite() || raw_score < 0.0 {
            return Err(LeaderboardError::InvalidInput);
        }
        let name = sanitize(raw_name);

        let current = self.store.load(self.cap)?;
        if !qualifies(raw_score, &current, self.cap) {
            let min = current.last().map(|e| e.score).unwrap_or(0);
            return Err(LeaderboardError::NotQualifying {
                min,
                cap: self.cap,
            });
        }

        let candidate = Entry {
            name,
            score: raw_score.floor() as u64,
            ts: now_ms(),
        };

        let entries = {
            let _guard = self.guard.lock();
            let mut merged = self.store.load(self.cap)?;
            merged.push(candidate.clone());
            let merged = rank::clamp_top(merged, self.cap);
            self.store.persist(&merged)?;
            merged
        };

        // The merge outcome is authoritative: an entry that lost the
        // tie-break after a concurrent write reports rank -1
        let rank = entries
            .iter()
            .position(|e| *e == candidate)
            .map(|i| i as i64 + 1)
            .unwrap_or(-1);
        if rank > 0 {
            log::info!("{} scored {} (rank {})", candidate.name, candidate.score, rank);
        } else {
            log::info!(
                "{} scored {} but was evicted during merge",
                candidate.name,
                candidate.score
            );
        }

        Ok(Submission {
            rank,
            entries,
            cap: self.cap,
        })
    }
}
