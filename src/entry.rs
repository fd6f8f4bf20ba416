//! Leaderboard entry type and persisted-record coercion
//!
//! The on-disk format is a JSON array of `{ name, score, ts }` objects.
//! Files written by older builds (or edited by hand) may contain records
//! with missing or wrongly-typed fields; those are coerced field-by-field
//! on load rather than rejected wholesale.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::sanitize::FALLBACK_NAME;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Sanitized display name
    pub name: String,
    /// Final score, non-negative
    pub score: u64,
    /// Unix timestamp (ms) of submission, used for tie-breaking
    pub ts: u64,
}

/// Current wall-clock time as unix milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl Entry {
    /// Coerce one persisted JSON value into an `Entry`.
    ///
    /// Missing or non-string `name` defaults to the fallback name, a score
    /// that is not a number (or numeric string) defaults to 0, and a missing
    /// timestamp defaults to `now_ms`. Returns `None` when the coerced score
    /// is negative or non-finite; such records are dropped by the caller.
    pub fn coerce(value: &Value, now_ms: u64) -> Option<Entry> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_NAME)
            .to_string();

        let score = match coerce_number(value.get("score")) {
            Some(n) if !n.is_finite() || n < 0.0 => return None,
            Some(n) => n.floor() as u64,
            None => 0,
        };

        let ts = coerce_number(value.get("ts"))
            .filter(|t| t.is_finite() && *t >= 0.0)
            .map(|t| t as u64)
            .unwrap_or(now_ms);

        Some(Entry { name, score, ts })
    }
}

/// Numeric coercion: JSON numbers pass through, numeric strings parse,
/// everything else is absent.
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_record_round_trips() {
        let entry = Entry {
            name: "Ada".to_string(),
            score: 1200,
            ts: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_malformed_fields_coerced() {
        let value = json!({ "name": 123, "score": "oops" });
        let entry = Entry::coerce(&value, 42).unwrap();
        assert_eq!(entry.name, "Player");
        assert_eq!(entry.score, 0);
        assert_eq!(entry.ts, 42);
    }

    #[test]
    fn test_negative_score_dropped() {
        let value = json!({ "name": "Mallory", "score": -3, "ts": 1 });
        assert!(Entry::coerce(&value, 42).is_none());
        // Numeric strings coerce before the sign check
        let value = json!({ "name": "Mallory", "score": "-3", "ts": 1 });
        assert!(Entry::coerce(&value, 42).is_none());
    }

    #[test]
    fn test_numeric_string_score_accepted() {
        let value = json!({ "name": "Bob", "score": "17", "ts": 9 });
        let entry = Entry::coerce(&value, 42).unwrap();
        assert_eq!(entry.score, 17);
        assert_eq!(entry.ts, 9);
    }

    #[test]
    fn test_missing_ts_defaults_to_now() {
        let value = json!({ "name": "Bob", "score": 5 });
        let entry = Entry::coerce(&value, 1234).unwrap();
        assert_eq!(entry.ts, 1234);
    }

    #[test]
    fn test_fractional_score_floored() {
        let value = json!({ "name": "Bob", "score": 9.9, "ts": 1 });
        assert_eq!(Entry::coerce(&value, 0).unwrap().score, 9);
    }
}
