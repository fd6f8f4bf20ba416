//! Ranking engine and capacity policy
//!
//! One total order over entries: score descending, then timestamp ascending
//! (earlier submission wins ties), then name ascending by code point. The
//! name comparison is byte order, not locale-aware, so rankings are identical
//! on every machine.

use std::cmp::Ordering;

use crate::entry::Entry;

/// Total-order comparator over entries.
pub fn compare(a: &Entry, b: &Entry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.ts.cmp(&b.ts))
        .then_with(|| a.name.cmp(&b.name))
}

/// Sort entries into ranked order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(compare);
}

/// Sort and cut to the top `cap` entries. The capacity policy only ever
/// drops trailing elements; it never reorders past the sort.
pub fn clamp_top(mut entries: Vec<Entry>, cap: usize) -> Vec<Entry> {
    sort_entries(&mut entries);
    entries.truncate(cap);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(name: &str, score: u64, ts: u64) -> Entry {
        Entry {
            name: name.to_string(),
            score,
            ts,
        }
    }

    #[test]
    fn test_score_descends() {
        let ranked = clamp_top(
            vec![entry("a", 5, 0), entry("b", 20, 0), entry("c", 10, 0)],
            25,
        );
        let scores: Vec<u64> = ranked.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![20, 10, 5]);
    }

    #[test]
    fn test_earlier_timestamp_wins_ties() {
        let ranked = clamp_top(vec![entry("late", 10, 200), entry("early", 10, 100)], 25);
        assert_eq!(ranked[0].name, "early");
        assert_eq!(ranked[1].name, "late");
    }

    #[test]
    fn test_name_breaks_remaining_ties() {
        let ranked = clamp_top(vec![entry("Bob", 10, 100), entry("Alice", 10, 100)], 25);
        assert_eq!(ranked[0].name, "Alice");
        assert_eq!(ranked[1].name, "Bob");
    }

    #[test]
    fn test_clamp_drops_only_trailing() {
        let ranked = clamp_top(
            vec![entry("a", 1, 0), entry("b", 3, 0), entry("c", 2, 0)],
            2,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].score, 3);
        assert_eq!(ranked[1].score, 2);
    }

    #[test]
    fn test_clamp_of_short_list_is_identity() {
        let ranked = clamp_top(vec![entry("a", 1, 0)], 25);
        assert_eq!(ranked.len(), 1);
    }

    fn arb_entry() -> impl Strategy<Value = Entry> {
        ("[a-z]{1,8}", 0u64..1000, 0u64..1000).prop_map(|(name, score, ts)| Entry {
            name,
            score,
            ts,
        })
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(mut entries in proptest::collection::vec(arb_entry(), 0..40)) {
            sort_entries(&mut entries);
            let once = entries.clone();
            sort_entries(&mut entries);
            prop_assert_eq!(entries, once);
        }

        #[test]
        fn prop_sorted_respects_total_order(mut entries in proptest::collection::vec(arb_entry(), 0..40)) {
            sort_entries(&mut entries);
            for pair in entries.windows(2) {
                prop_assert_ne!(compare(&pair[0], &pair[1]), std::cmp::Ordering::Greater);
            }
        }

        #[test]
        fn prop_clamp_keeps_top(entries in proptest::collection::vec(arb_entry(), 0..40), cap in 1usize..10) {
            let ranked = clamp_top(entries.clone(), cap);
            prop_assert!(ranked.len() <= cap);
            prop_assert_eq!(ranked.len(), entries.len().min(cap));
        }
    }
}
