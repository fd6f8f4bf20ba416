//! Leaderboard configuration
//!
//! Loaded once at process start from environment variables and passed into
//! the service explicitly; nothing reads ambient state per call.
//!
//! Environment:
//! - `LEADERBOARD_CAP` (default 25, minimum 1)
//! - `LEADERBOARD_PATH` (default `data/leaderboard.json`)

use std::env;
use std::path::PathBuf;

/// Default maximum number of retained entries
pub const DEFAULT_CAP: usize = 25;

/// Default storage location, relative to the working directory
pub const DEFAULT_PATH: &str = "data/leaderboard.json";

/// Immutable leaderboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of retained entries, at least 1
    pub cap: usize,
    /// Backing file for the ranked list
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            path: PathBuf::from(DEFAULT_PATH),
        }
    }
}

impl Config {
    /// Explicit configuration. A non-positive cap falls back to the default.
    pub fn new(path: impl Into<PathBuf>, cap: usize) -> Self {
        Self {
            cap: if cap >= 1 { cap } else { DEFAULT_CAP },
            path: path.into(),
        }
    }

    /// Resolve configuration from the environment. Invalid or non-positive
    /// values fall back to the defaults.
    pub fn from_env() -> Self {
        let cap = env::var("LEADERBOARD_CAP")
            .ok()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite() && *n >= 1.0)
            .map(|n| n.floor() as usize)
            .unwrap_or(DEFAULT_CAP);

        let path = env::var("LEADERBOARD_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH));

        Self { cap, path }
    }
}
