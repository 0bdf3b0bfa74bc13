//! Keyed container capability.
//!
//! A trace replay only needs to insert and remove string keys, reset the
//! container between trials and describe the container's state afterwards. Any
//! type offering those can be measured by the replay harness.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

/// A container of string keys that recorded traces can be replayed against.
///
/// `csv_stats_header` and `csv_stats` must produce the same number of fields so
/// report rows line up with the header.
pub trait KeyedContainer {
    /// Adds `key`. Returns `true` if the container changed.
    fn insert(&mut self, key: &str) -> bool;

    /// Removes `key`. Returns `true` if the key was present.
    fn remove(&mut self, key: &str) -> bool;

    /// Returns the container to its freshly constructed state.
    fn clear(&mut self);

    /// Number of keys currently held.
    fn len(&self) -> usize;

    /// Returns true if no key is held.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the columns returned by [`csv_stats`](Self::csv_stats).
    fn csv_stats_header() -> &'static [&'static str]
    where
        Self: Sized;

    /// Container state as CSV fields.
    fn csv_stats(&self) -> Vec<String>;
}
