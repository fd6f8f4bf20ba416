//! Arcade leaderboard backend
//!
//! Persistence and ranking engine for the game's top-N score list: a bounded,
//! single-file ranked store with deterministic tie-breaking, input
//! sanitization, capacity eviction, and crash-safe writes.
//!
//! Core modules:
//! - `config`: immutable cap/path configuration, resolved once at startup
//! - `sanitize`: display-name normalization for untrusted input
//! - `entry`: the persisted record and malformed-record coercion
//! - `rank`: total-order comparator and capacity policy
//! - `store`: durable JSON-file store behind a swappable trait
//! - `service`: read / qualify / submit surface with the write guard

pub mod config;
pub mod entry;
pub mod error;
pub mod rank;
pub mod sanitize;
pub mod service;
pub mod store;

pub use config::Config;
pub use entry::Entry;
pub use error::LeaderboardError;
pub use sanitize::sanitize;
pub use service::{Leaderboard, Snapshot, Submission, qualifies};
pub use store::{FileStore, MemoryStore, Store, StoreError};
