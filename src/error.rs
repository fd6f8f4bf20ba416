//! Service-level error taxonomy
//!
//! Validation failures are rejected before any I/O; store failures are
//! wrapped so callers never match on raw `io::Error` kinds. Malformed
//! persisted records are not errors at all — they are dropped during load.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// Score was not a finite, non-negative number
    #[error("invalid score: must be a finite, non-negative number")]
    InvalidInput,

    /// Score does not beat the current floor of a full list
    #[error("score does not qualify (minimum to beat: {min}, cap: {cap})")]
    NotQualifying { min: u64, cap: usize },

    /// Underlying storage failed on load or persist
    #[error("leaderboard store unavailable")]
    StoreUnavailable(#[from] StoreError),
}
