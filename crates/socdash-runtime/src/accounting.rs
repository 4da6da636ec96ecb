//! Live/fallback call accounting.
//!
//! Counts how often the client served real data versus substituted data.
//! Purely observational; nothing here changes how a call resolves.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of accumulated call outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallUsage {
    /// Calls answered by the backend
    pub live_calls: u64,

    /// Calls answered from the fallback table
    pub fallback_calls: u64,

    /// Fallbacks that matched no rule
    pub unmatched_fallbacks: u64,

    /// Fallbacks served per area
    pub fallbacks_by_area: BTreeMap<String, u64>,
}

impl CallUsage {
    pub fn total_calls(&self) -> u64 {
        self.live_calls + self.fallback_calls
    }

    /// Share of calls that fell back, in 0.0..=1.0.
    pub fn fallback_ratio(&self) -> f64 {
        match self.total_calls() {
            0 => 0.0,
            total => self.fallback_calls as f64 / total as f64,
        }
    }
}

#[derive(Debug, Default)]
struct FallbackTally {
    total: u64,
    unmatched: u64,
    by_area: BTreeMap<String, u64>,
}

/// Call counters with a per-area fallback tally.
///
/// Live calls are a single atomic. Fallback figures share one lock so a
/// snapshot always satisfies
/// `fallback_calls == unmatched_fallbacks + sum(fallbacks_by_area)`.
#[derive(Debug, Default)]
pub struct CallCounter {
    live: AtomicU64,
    fallbacks: RwLock<FallbackTally>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a live response.
    pub fn record_live(&self) {
        self.live.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a fallback, `area` being the matched rule's area.
    pub fn record_fallback(&self, area: Option<&str>) {
        let mut tally = self.fallbacks.write();
        tally.total += 1;

        match area {
            Some(area) => {
                *tally.by_area.entry(area.to_string()).or_insert(0) += 1;
            }
            None => {
                tally.unmatched += 1;
            }
        }
    }

    pub fn snapshot(&self) -> CallUsage {
        let tally = self.fallbacks.read();
        CallUsage {
            live_calls: self.live.load(Ordering::SeqCst),
            fallback_calls: tally.total,
            unmatched_fallbacks: tally.unmatched,
            fallbacks_by_area: tally.by_area.clone(),
        }
    }

    pub fn reset(&self) {
        let mut tally = self.fallbacks.write();
        self.live.store(0, Ordering::SeqCst);
        *tally = FallbackTally::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let counter = CallCounter::new();
        counter.record_live();
        counter.record_live();
        counter.record_fallback(Some("agents"));
        counter.record_fallback(Some("agents"));
        counter.record_fallback(None);

        let usage = counter.snapshot();
        assert_eq!(usage.live_calls, 2);
        assert_eq!(usage.fallback_calls, 3);
        assert_eq!(usage.unmatched_fallbacks, 1);
        assert_eq!(usage.fallbacks_by_area["agents"], 2);
        assert_eq!(usage.total_calls(), 5);
        assert!((usage.fallback_ratio() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let counter = CallCounter::new();
        counter.record_fallback(Some("alerts"));
        counter.reset();
        assert_eq!(counter.snapshot(), CallUsage::default());
        assert_eq!(counter.snapshot().fallback_ratio(), 0.0);
    }

    #[test]
    fn test_snapshot_consistent_under_concurrency() {
        let counter = std::sync::Arc::new(CallCounter::new());
        let areas = [Some("agents"), Some("alerts"), None];

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let counter = counter.clone();
                std::thread::spawn(move || {
                    for i in 0..500 {
                        counter.record_fallback(areas[(t + i) % areas.len()]);
                        counter.record_live();
                    }
                })
            })
            .collect();

        // Read while writers are running
        for _ in 0..200 {
            let usage = counter.snapshot();
            let by_area: u64 = usage.fallbacks_by_area.values().sum();
            assert_eq!(usage.fallback_calls, usage.unmatched_fallbacks + by_area);
        }

        for writer in writers {
            writer.join().unwrap();
        }

        let usage = counter.snapshot();
        assert_eq!(usage.fallback_calls, 2000);
        assert_eq!(usage.live_calls, 2000);
    }
}
