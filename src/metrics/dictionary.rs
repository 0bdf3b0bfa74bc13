//! Dictionary Metrics
//!
//! Counters for [`HashTableDictionary`](crate::HashTableDictionary). Probe
//! counts are the number of slots examined, so a key found in its home slot
//! costs one probe.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Operation and probe counters for an open-addressing dictionary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DictionaryMetrics {
    /// Insert calls that stored a new key
    pub inserts: u64,
    /// Insert calls for a key that was already present
    pub duplicate_inserts: u64,
    /// Insert calls refused because every slot held a live key
    pub rejected_inserts: u64,
    /// Remove calls that deleted a key
    pub removes: u64,
    /// Remove calls for a key that was not present
    pub missing_removes: u64,
    /// Slots examined across all inserts and removes
    pub probes: u64,
    /// Longest single probe sequence observed
    pub max_probe: u64,
    /// In-place rehashes triggered by tombstone build-up
    pub compactions: u64,
}

impl DictionaryMetrics {
    /// Creates zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_probes(&mut self, probes: u64) {
        self.probes += probes;
        if probes > self.max_probe {
            self.max_probe = probes;
        }
    }

    /// Number of insert and remove calls that were counted.
    pub fn operations(&self) -> u64 {
        self.inserts
            + self.duplicate_inserts
            + self.rejected_inserts
            + self.removes
            + self.missing_removes
    }

    /// Mean slots examined per operation, or 0.0 with no operations.
    pub fn avg_probe(&self) -> f64 {
        let ops = self.operations();
        if ops > 0 {
            self.probes as f64 / ops as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("avg_probe".to_string(), self.avg_probe());
        metrics.insert("compactions".to_string(), self.compactions as f64);
        metrics.insert(
            "duplicate_inserts".to_string(),
            self.duplicate_inserts as f64,
        );
        metrics.insert("inserts".to_string(), self.inserts as f64);
        metrics.insert("max_probe".to_string(), self.max_probe as f64);
        metrics.insert("missing_removes".to_string(), self.missing_removes as f64);
        metrics.insert("probes".to_string(), self.probes as f64);
        metrics.insert("rejected_inserts".to_string(), self.rejected_inserts as f64);
        metrics.insert("removes".to_string(), self.removes as f64);
        metrics
    }
}
