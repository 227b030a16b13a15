//! In-memory violation counters.

use dashmap::DashMap;
use tracing::debug;

use super::player::PlayerId;

/// Per-suspect count of confirmed violations.
///
/// Lives for the process lifetime; nothing is persisted or evicted.
#[derive(Debug, Default)]
pub struct ViolationTracker {
    counts: DashMap<PlayerId, u32>,
}

impl ViolationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one violation for `suspect` and return the updated count.
    ///
    /// The increment and read happen under the entry's shard lock, so
    /// concurrent calls for the same suspect never lose an update.
    pub fn record(&self, suspect: PlayerId) -> u32 {
        let mut entry = self.counts.entry(suspect).or_insert(0);
        let count = entry.saturating_add(1);
        *entry = count;
        drop(entry);

        debug!(suspect = %suspect, count, "violation recorded");
        count
    }

    /// Current count for `suspect`; zero if never flagged.
    pub fn count(&self, suspect: PlayerId) -> u32 {
        self.counts.get(&suspect).map(|c| *c).unwrap_or(0)
    }

    /// Number of distinct players flagged so far.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_unseen_player_is_zero() {
        let tracker = ViolationTracker::new();
        assert_eq!(tracker.count(PlayerId(42)), 0);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_record_is_monotonic() {
        let tracker = ViolationTracker::new();
        for expected in 1..=5 {
            assert_eq!(tracker.record(PlayerId(200)), expected);
        }
        assert_eq!(tracker.count(PlayerId(200)), 5);
        assert_eq!(tracker.count(PlayerId(201)), 0);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_concurrent_records_are_not_lost() {
        let tracker = Arc::new(ViolationTracker::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        tracker.record(PlayerId(7));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tracker.count(PlayerId(7)), 2000);
    }
}
