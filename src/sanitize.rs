//! Display-name sanitization for untrusted player input
//!
//! Names arrive straight from the browser and may contain control characters,
//! padding whitespace, or be arbitrarily long. Everything persisted goes
//! through [`sanitize`] first.

/// Maximum length of a display name after sanitization
pub const MAX_NAME_LEN: usize = 24;

/// Substituted when sanitization leaves nothing usable
pub const FALLBACK_NAME: &str = "Player";

/// Normalize an untrusted display name.
///
/// Non-printable code points (anything outside ASCII `0x20..=0x7E`) are
/// treated as separators, whitespace runs collapse to a single space, the
/// result is trimmed and capped at [`MAX_NAME_LEN`] characters. An empty
/// result falls back to [`FALLBACK_NAME`].
pub fn sanitize(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .map(|c| if (' '..='~').contains(&c) { c } else { ' ' })
        .collect();

    // split_whitespace both trims and collapses interior runs
    let mut safe = mapped.split_whitespace().collect::<Vec<_>>().join(" ");

    // Everything left is printable ASCII, so byte length == char count
    safe.truncate(MAX_NAME_LEN);
    // Truncation can leave a dangling separator
    if safe.ends_with(' ') {
        safe.pop();
    }

    if safe.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        safe
    }
}
