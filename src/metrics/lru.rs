//! LRU Tracker Metrics

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Counters kept by an [`LruTracker`](crate::LruTracker).
///
/// `admissions` counts every key that became resident, including the ones
/// admitted after an eviction, so `hits + admissions == accesses` always holds.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LruTrackerMetrics {
    /// Total number of accesses processed
    pub accesses: u64,
    /// Accesses to a key that was already resident
    pub hits: u64,
    /// Accesses that made a key resident
    pub admissions: u64,
    /// Resident keys displaced to make room for an admission
    pub evictions: u64,
}

impl LruTrackerMetrics {
    /// Creates zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.accesses += 1;
        self.hits += 1;
    }

    pub(crate) fn record_admission(&mut self) {
        self.accesses += 1;
        self.admissions += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Fraction of accesses that hit, or 0.0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses > 0 {
            self.hits as f64 / self.accesses as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("accesses".to_string(), self.accesses as f64);
        metrics.insert("admissions".to_string(), self.admissions as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("hits".to_string(), self.hits as f64);
        metrics
    }
}
