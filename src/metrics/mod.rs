//! Container Metrics System
//!
//! Metrics are reported as `BTreeMap<String, f64>` snapshots so that every
//! report lists its keys in the same order, which keeps CSV exports and test
//! expectations stable from run to run.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;

pub mod dictionary;
pub mod lru;

pub use dictionary::DictionaryMetrics;
pub use lru::LruTrackerMetrics;

/// Uniform metrics reporting for the containers in this crate.
pub trait TableMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name identifying the container (e.g. "LRU", "HASH_DOUBLE").
    fn algorithm_name(&self) -> &'static str;
}
