//! Open-Addressing Hash Dictionary
//!
//! [`HashTableDictionary`] is a set of string keys stored in a fixed, usually prime,
//! number of slots. It is the container that recorded LRU traces are replayed
//! against, so it is built for predictable behaviour rather than growth: the slot
//! array never resizes, and inserting into a table whose every slot holds a live
//! key is refused.
//!
//! # Probing
//!
//! Each key is hashed once. The low 32 bits give the home slot `h1(key) mod M`
//! and the high 32 bits give `h2(key)`. On collision the probe advances by a
//! fixed step chosen by the [`ProbeStrategy`]:
//!
//! | Strategy | Step |
//! |----------|------|
//! | [`ProbeStrategy::Double`] | `1 + h2(key) mod (M - 1)` |
//! | [`ProbeStrategy::Single`] | `1` |
//!
//! With a prime `M` both sequences visit every slot before repeating.
//!
//! # Deletion
//!
//! Removing a key leaves a tombstone so later probes still walk past it. Inserts
//! reuse the first tombstone on their probe path. Once the number of never-used
//! slots drops below `M / 8` the table is rebuilt, which drops every tombstone
//! and re-places the live keys.
//!
//! # Statistics
//!
//! When constructed with `track_stats`, the table counts operation outcomes and
//! probe lengths in a [`DictionaryMetrics`]. [`clear`](HashTableDictionary::clear)
//! resets those counters along with the contents.

extern crate alloc;

use crate::config::DictionaryConfig;
use crate::container::KeyedContainer;
use crate::metrics::{DictionaryMetrics, TableMetrics};
use ahash::RandomState;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::mem;
use core::num::NonZeroUsize;

// Fixed seeds keep slot placement identical from run to run.
const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Column names produced by [`HashTableDictionary::csv_stats`], in order.
pub const STATS_COLUMNS: [&str; 13] = [
    "table_size",
    "strategy",
    "active",
    "tombstones",
    "inserts_ok",
    "duplicate_inserts",
    "rejected_inserts",
    "removes_ok",
    "missing_removes",
    "probes",
    "max_probe",
    "avg_probe",
    "compactions",
];

/// Collision resolution discipline for a [`HashTableDictionary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStrategy {
    /// Step size derived from a second, independent hash of the key.
    Double,
    /// Step size of one slot (linear probing).
    Single,
}

impl ProbeStrategy {
    /// Lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeStrategy::Double => "double",
            ProbeStrategy::Single => "single",
        }
    }
}

impl fmt::Display for ProbeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Slot {
    Empty,
    Deleted,
    Occupied(Box<str>),
}

enum Probe {
    /// Key lives in this slot.
    Found(usize),
    /// Key is absent; this is where it would go.
    Vacant(usize),
    /// Key is absent and there is nowhere to put it.
    Full,
}

/// A fixed-size open-addressing set of string keys.
///
/// # Examples
///
/// ```
/// use lru_trace::{HashTableDictionary, ProbeStrategy};
/// use core::num::NonZeroUsize;
///
/// let cap = NonZeroUsize::new(13).unwrap();
/// let mut table = HashTableDictionary::new(cap, ProbeStrategy::Double, true);
///
/// assert!(table.insert("apple"));
/// assert!(!table.insert("apple"));
/// assert!(table.contains("apple"));
///
/// assert!(table.remove("apple"));
/// assert!(!table.remove("apple"));
/// assert_eq!(table.tombstones(), 1);
/// ```
pub struct HashTableDictionary {
    slots: Vec<Slot>,
    strategy: ProbeStrategy,
    track_stats: bool,
    active: usize,
    tombstones: usize,
    hasher: RandomState,
    metrics: DictionaryMetrics,
}

impl HashTableDictionary {
    /// Creates an empty table with `capacity` slots.
    pub fn new(capacity: NonZeroUsize, strategy: ProbeStrategy, track_stats: bool) -> Self {
        Self::init(DictionaryConfig {
            capacity,
            strategy,
            track_stats,
        })
    }

    /// Creates an empty table from a configuration.
    pub fn init(config: DictionaryConfig) -> Self {
        let [a, b, c, d] = HASH_SEEDS;
        HashTableDictionary {
            slots: empty_slots(config.capacity.get()),
            strategy: config.strategy,
            track_stats: config.track_stats,
            active: 0,
            tombstones: 0,
            hasher: RandomState::with_seeds(a, b, c, d),
            metrics: DictionaryMetrics::new(),
        }
    }

    /// Adds `key` to the table.
    ///
    /// Returns `true` if the key was stored, `false` if it was already present or
    /// every slot holds a live key.
    pub fn insert(&mut self, key: &str) -> bool {
        let (probe, probes) = self.probe(key);
        let inserted = match probe {
            Probe::Found(_) => {
                if self.track_stats {
                    self.metrics.duplicate_inserts += 1;
                }
                false
            }
            Probe::Vacant(idx) => {
                if matches!(self.slots[idx], Slot::Deleted) {
                    self.tombstones -= 1;
                }
                self.slots[idx] = Slot::Occupied(key.into());
                self.active += 1;
                if self.track_stats {
                    self.metrics.inserts += 1;
                }
                true
            }
            Probe::Full => {
                if self.track_stats {
                    self.metrics.rejected_inserts += 1;
                }
                false
            }
        };
        if self.track_stats {
            self.metrics.record_probes(probes);
        }
        if inserted && self.needs_compaction() {
            self.compact();
        }
        inserted
    }

    /// Deletes `key`, leaving a tombstone in its slot.
    ///
    /// Returns whether the key was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let (probe, probes) = self.probe(key);
        let removed = match probe {
            Probe::Found(idx) => {
                self.slots[idx] = Slot::Deleted;
                self.active -= 1;
                self.tombstones += 1;
                true
            }
            Probe::Vacant(_) | Probe::Full => false,
        };
        if self.track_stats {
            if removed {
                self.metrics.removes += 1;
            } else {
                self.metrics.missing_removes += 1;
            }
            self.metrics.record_probes(probes);
        }
        removed
    }

    /// Returns true if `key` is present. Never counted in the statistics.
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.probe(key).0, Probe::Found(_))
    }

    /// Empties every slot and resets the statistics.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.active = 0;
        self.tombstones = 0;
        self.metrics = DictionaryMetrics::new();
    }

    /// Number of live keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.active
    }

    /// Returns true if the table holds no live keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a tombstone.
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Probing discipline this table was built with.
    #[inline]
    pub fn strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    /// Operation and probe counters. All zero unless stats tracking is on.
    pub fn metrics(&self) -> &DictionaryMetrics {
        &self.metrics
    }

    /// Column names matching [`csv_stats`](Self::csv_stats).
    pub fn csv_stats_header() -> &'static [&'static str] {
        &STATS_COLUMNS
    }

    /// Current table shape and counters as CSV fields.
    pub fn csv_stats(&self) -> Vec<String> {
        let m = &self.metrics;
        let mut row = Vec::with_capacity(STATS_COLUMNS.len());
        row.push(self.capacity().to_string());
        row.push(self.strategy.as_str().to_string());
        row.push(self.active.to_string());
        row.push(self.tombstones.to_string());
        row.push(m.inserts.to_string());
        row.push(m.duplicate_inserts.to_string());
        row.push(m.rejected_inserts.to_string());
        row.push(m.removes.to_string());
        row.push(m.missing_removes.to_string());
        row.push(m.probes.to_string());
        row.push(m.max_probe.to_string());
        row.push(format!("{:.3}", m.avg_probe()));
        row.push(m.compactions.to_string());
        row
    }

    /// Home slot and step for `key`.
    ///
    /// One 64-bit hash feeds both: the low half picks the home slot and the high
    /// half the double-hashing step.
    fn start(&self, key: &str) -> (usize, usize) {
        let m = self.slots.len() as u64;
        let hash = self.hasher.hash_one(key);
        let home = ((hash & 0xffff_ffff) % m) as usize;
        let step = match self.strategy {
            ProbeStrategy::Double if m > 1 => 1 + ((hash >> 32) % (m - 1)) as usize,
            _ => 1,
        };
        (home, step)
    }

    /// Walks the probe sequence for `key`, visiting at most `M` slots.
    ///
    /// Returns the outcome and the number of slots examined.
    fn probe(&self, key: &str) -> (Probe, u64) {
        let m = self.slots.len();
        let (mut idx, step) = self.start(key);
        let mut first_tombstone = None;

        for examined in 1..=m {
            match &self.slots[idx] {
                Slot::Empty => {
                    return (
                        Probe::Vacant(first_tombstone.unwrap_or(idx)),
                        examined as u64,
                    );
                }
                Slot::Deleted => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(idx);
                    }
                }
                Slot::Occupied(k) if &**k == key => {
                    return (Probe::Found(idx), examined as u64);
                }
                Slot::Occupied(_) => {}
            }
            idx = (idx + step) % m;
        }

        let probe = match first_tombstone {
            Some(idx) => Probe::Vacant(idx),
            None => Probe::Full,
        };
        (probe, m as u64)
    }

    fn needs_compaction(&self) -> bool {
        let m = self.slots.len();
        let empty = m - self.active - self.tombstones;
        self.tombstones > 0 && empty < m / 8
    }

    /// Rebuilds the slot array from the live keys, dropping every tombstone.
    fn compact(&mut self) {
        let m = self.slots.len();
        let old = mem::replace(&mut self.slots, empty_slots(m));
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied(key) = slot {
                self.place(key);
            }
        }
        if self.track_stats {
            self.metrics.compactions += 1;
        }
    }

    /// Puts a key known to be absent into the first empty slot of its sequence.
    fn place(&mut self, key: Box<str>) {
        let m = self.slots.len();
        let (mut idx, step) = self.start(&key);
        for _ in 0..m {
            if matches!(self.slots[idx], Slot::Empty) {
                self.slots[idx] = Slot::Occupied(key);
                return;
            }
            idx = (idx + step) % m;
        }
        // A step sharing a factor with M cycles early; fall back to a scan.
        if let Some(idx) = self.slots.iter().position(|s| matches!(s, Slot::Empty)) {
            self.slots[idx] = Slot::Occupied(key);
        }
    }
}

fn empty_slots(m: usize) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(m);
    slots.resize_with(m, || Slot::Empty);
    slots
}

impl KeyedContainer for HashTableDictionary {
    fn insert(&mut self, key: &str) -> bool {
        HashTableDictionary::insert(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        HashTableDictionary::remove(self, key)
    }

    fn clear(&mut self) {
        HashTableDictionary::clear(self)
    }

    fn len(&self) -> usize {
        self.active
    }

    fn csv_stats_header() -> &'static [&'static str] {
        HashTableDictionary::csv_stats_header()
    }

    fn csv_stats(&self) -> Vec<String> {
        HashTableDictionary::csv_stats(self)
    }
}

impl TableMetrics for HashTableDictionary {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.to_btreemap();
        metrics.insert("active".to_string(), self.active as f64);
        metrics.insert("table_size".to_string(), self.capacity() as f64);
        metrics.insert("tombstones".to_string(), self.tombstones as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        match self.strategy {
            ProbeStrategy::Double => "HASH_DOUBLE",
            ProbeStrategy::Single => "HASH_SINGLE",
        }
    }
}

impl fmt::Debug for HashTableDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTableDictionary")
            .field("capacity", &self.capacity())
            .field("strategy", &self.strategy)
            .field("active", &self.active)
            .field("tombstones", &self.tombstones)
            .finish()
    }
}
