//! Exact LRU Residency Tracker
//!
//! [`LruTracker`] keeps the set of resident keys for a cache of fixed capacity and
//! reports, for every access, whether the key was already resident, newly admitted,
//! or admitted at the cost of evicting the least recently used key.
//!
//! It stores keys only. There is no value payload, so the tracker is the ground
//! truth that a trace generator can replay against rather than a cache to read from.
//!
//! # Algorithm
//!
//! Recency order lives in an arena-backed doubly linked list (most recently used at
//! the front) and a hash map points each resident key at its list node:
//!
//! ```text
//!   map: { "a" → #2, "b" → #0, "c" → #1 }
//!
//!   front (MRU)                       back (LRU)
//!      "a" ◄──────► "c" ◄──────► "b"
//! ```
//!
//! - **hit**: the key's node moves to the front.
//! - **miss, not full**: a node for the key is pushed at the front.
//! - **miss, full**: the back node is popped and its key removed from the map,
//!   then the new key is pushed at the front.
//!
//! # Performance Characteristics
//!
//! - Access: O(1) expected. Hits never allocate.
//! - Space: O(capacity). The arena reserves all nodes on construction and reuses
//!   freed slots, so a steady eviction stream never grows it.

extern crate alloc;

use crate::config::LruTrackerConfig;
use crate::list::{Iter, List, NodeId};
use crate::metrics::{LruTrackerMetrics, TableMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Outcome of a single [`LruTracker::access`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<K> {
    /// The key was resident and is now the most recently used.
    Hit,
    /// The key was not resident and there was room for it.
    Admitted,
    /// The key was not resident; the contained key was evicted to make room.
    Evicted(K),
}

impl<K> Access<K> {
    /// Returns true if the access found the key already resident.
    pub fn is_hit(&self) -> bool {
        matches!(self, Access::Hit)
    }

    /// Returns the evicted key, if any.
    pub fn victim(&self) -> Option<&K> {
        match self {
            Access::Evicted(k) => Some(k),
            _ => None,
        }
    }
}

/// Tracks which keys an LRU cache of fixed capacity would hold.
///
/// # Examples
///
/// ```
/// use lru_trace::{Access, LruTracker};
/// use core::num::NonZeroUsize;
///
/// let mut tracker = LruTracker::new(NonZeroUsize::new(2).unwrap());
///
/// assert_eq!(tracker.access("apple"), Access::Admitted);
/// assert_eq!(tracker.access("banana"), Access::Admitted);
///
/// // Touching "apple" makes "banana" the eviction candidate
/// assert_eq!(tracker.access("apple"), Access::Hit);
/// assert_eq!(tracker.access("cherry"), Access::Evicted("banana"));
///
/// assert!(tracker.contains(&"apple"));
/// assert!(!tracker.contains(&"banana"));
/// ```
pub struct LruTracker<K, S = DefaultHashBuilder> {
    config: LruTrackerConfig,
    list: List<K>,
    map: HashMap<K, NodeId, S>,
    metrics: LruTrackerMetrics,
}

impl<K: Hash + Eq + Clone, S: BuildHasher> LruTracker<K, S> {
    /// Creates a tracker with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        Self::from_parts(LruTrackerConfig::new(cap), hash_builder)
    }

    /// Creates a tracker from a configuration, with an optional hash builder.
    pub fn init(config: LruTrackerConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::from_parts(config, hasher.unwrap_or_default())
    }

    fn from_parts(config: LruTrackerConfig, hash_builder: S) -> Self {
        let cap = config.capacity;
        LruTracker {
            config,
            list: List::new(cap),
            map: HashMap::with_capacity_and_hasher(cap.get(), hash_builder),
            metrics: LruTrackerMetrics::new(),
        }
    }

    /// Records an access to `key` and reports what the cache had to do.
    pub fn access(&mut self, key: K) -> Access<K> {
        if let Some(&node) = self.map.get(&key) {
            self.list.move_to_front(node);
            self.metrics.record_hit();
            return Access::Hit;
        }

        let mut victim = None;
        if self.list.is_full() {
            if let Some(old) = self.list.remove_last() {
                self.map.remove(&old);
                self.metrics.record_eviction();
                victim = Some(old);
            }
        }

        if let Some(node) = self.list.add(key.clone()) {
            self.map.insert(key, node);
        }
        self.metrics.record_admission();

        match victim {
            Some(old) => Access::Evicted(old),
            None => Access::Admitted,
        }
    }

    /// Returns true if `key` is resident. Does not touch recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Removes every resident key and resets the counters.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
        self.metrics = LruTrackerMetrics::new();
    }
}

impl<K, S> LruTracker<K, S> {
    /// Returns the maximum number of resident keys.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the number of resident keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if no key is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The key that the next admission into a full tracker would evict.
    pub fn peek_lru(&self) -> Option<&K> {
        self.list.back().and_then(|id| self.list.get_value(id))
    }

    /// Iterates resident keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        self.list.iter()
    }

    /// Returns the access counters collected so far.
    pub fn metrics(&self) -> &LruTrackerMetrics {
        &self.metrics
    }
}

impl<K: Hash + Eq + Clone> LruTracker<K> {
    /// Creates a tracker with the specified capacity and the default hasher.
    pub fn new(cap: NonZeroUsize) -> LruTracker<K, DefaultHashBuilder> {
        LruTracker::init(LruTrackerConfig::new(cap), None)
    }
}

impl<K, S> TableMetrics for LruTracker<K, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.to_btreemap();
        metrics.insert("capacity".to_string(), self.cap().get() as f64);
        metrics.insert("resident".to_string(), self.len() as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

impl<K, S> core::fmt::Debug for LruTracker<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruTracker")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}
