//! Configuration for the exact LRU residency tracker.

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an [`LruTracker`](crate::LruTracker).
///
/// `capacity` is the working-set size N: the tracker never holds more than
/// `capacity` resident keys.
///
/// # Examples
///
/// ```
/// use lru_trace::config::LruTrackerConfig;
/// use lru_trace::LruTracker;
/// use core::num::NonZeroUsize;
///
/// let config = LruTrackerConfig {
///     capacity: NonZeroUsize::new(1024).unwrap(),
/// };
/// let tracker: LruTracker<&str> = LruTracker::init(config, None);
/// assert_eq!(tracker.cap().get(), 1024);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruTrackerConfig {
    /// Maximum number of resident keys.
    pub capacity: NonZeroUsize,
}

impl LruTrackerConfig {
    /// Creates a config for the given capacity.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }
}

impl fmt::Debug for LruTrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruTrackerConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
