//! Configuration for the open-addressing dictionary.
//!
//! # Sizing
//!
//! `capacity` is the number of physical slots, not the number of keys the caller
//! expects to store. Double hashing only visits every slot when the slot count is
//! prime, so benchmark harnesses pick a prime capacity that keeps the expected
//! load around 0.8:
//!
//! ```text
//! N = 1024 live keys  ->  capacity = 1279  (load ≈ 0.80)
//! ```

use crate::dictionary::ProbeStrategy;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a [`HashTableDictionary`](crate::HashTableDictionary).
///
/// # Fields
///
/// - `capacity`: number of slots in the table (ideally prime)
/// - `strategy`: collision-resolution discipline
/// - `track_stats`: record probe and operation counters; when `false` the
///   counters stay at zero and cost nothing on the hot path
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DictionaryConfig {
    /// Number of physical slots.
    pub capacity: NonZeroUsize,
    /// Probe sequence used on collisions.
    pub strategy: ProbeStrategy,
    /// Whether operation counters are recorded.
    pub track_stats: bool,
}

impl fmt::Debug for DictionaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryConfig")
            .field("capacity", &self.capacity)
            .field("strategy", &self.strategy)
            .field("track_stats", &self.track_stats)
            .finish()
    }
}
