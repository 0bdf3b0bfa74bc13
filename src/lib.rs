//! # lru-trace
//!
//! Building blocks for synthesizing and replaying LRU cache traces.
//!
//! The crate provides two kinds of container:
//!
//! - an exact **LRU residency tracker**, which answers "what would an LRU cache of
//!   capacity N hold after this access?" and names the evicted key when there is
//!   one. Trace generators drive it to turn an access stream into an insert/erase
//!   event stream.
//! - an **open-addressing hash dictionary** with a fixed slot count and a choice of
//!   probing discipline. Replay harnesses feed it the recorded events and time
//!   the result.
//!
//! ## Quick Reference
//!
//! | Type | Description | Used For |
//! |------|-------------|----------|
//! | [`LruTracker`] | Exact LRU residency over keys | Generating ground-truth traces |
//! | [`HashTableDictionary`] | Fixed-size open-addressing key set | Replaying traces |
//! | [`KeyedContainer`] | Insert / remove / clear / stats capability | Harness seam |
//!
//! ## Code Examples
//!
//! ### Tracking LRU residency
//!
//! ```rust
//! use lru_trace::{Access, LruTracker};
//! use lru_trace::config::LruTrackerConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruTrackerConfig::new(NonZeroUsize::new(2).unwrap());
//! let mut tracker: LruTracker<&str> = LruTracker::init(config, None);
//!
//! tracker.access("a");
//! tracker.access("b");
//! assert_eq!(tracker.access("c"), Access::Evicted("a"));
//! assert_eq!(tracker.iter().copied().collect::<Vec<_>>(), vec!["c", "b"]);
//! ```
//!
//! ### Replaying into a dictionary
//!
//! ```rust
//! use lru_trace::{HashTableDictionary, KeyedContainer, ProbeStrategy};
//! use core::num::NonZeroUsize;
//!
//! fn replay<C: KeyedContainer>(c: &mut C, keys: &[&str]) {
//!     c.clear();
//!     for k in keys {
//!         c.insert(k);
//!     }
//! }
//!
//! let mut table =
//!     HashTableDictionary::new(NonZeroUsize::new(1279).unwrap(), ProbeStrategy::Single, true);
//! replay(&mut table, &["x", "y", "x"]);
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.metrics().duplicate_inserts, 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `hashbrown` (default): use `hashbrown` for the tracker's key index. Disable it
//!   together with enabling `std` to use the standard library map instead.
//! - `std`: link the standard library.
//!
//! ## Modules
//!
//! - [`list`]: Arena-backed doubly linked list with stable node handles
//! - [`lru`]: Exact LRU residency tracker
//! - [`dictionary`]: Open-addressing hash dictionary
//! - [`container`]: The keyed-container capability trait
//! - [`config`]: Configuration structures
//! - [`metrics`]: Counters and reporting

#![no_std]

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Arena-backed doubly linked list.
///
/// Nodes are addressed by [`NodeId`](list::NodeId) handles that stay valid until
/// the node is removed, so an index can point into the list without borrowing it.
pub mod list;

/// Container configuration structures.
pub mod config;

/// Exact LRU residency tracker.
///
/// Reports, for every access, whether the key hit, was admitted, or displaced the
/// least recently used key.
pub mod lru;

/// Open-addressing hash dictionary with double or single-step probing.
pub mod dictionary;

/// Keyed container capability used by replay harnesses.
pub mod container;

/// Container metrics.
///
/// Counters for each container plus a common reporting trait that renders them as
/// ordered key-value snapshots.
pub mod metrics;

pub use container::KeyedContainer;
pub use dictionary::{HashTableDictionary, ProbeStrategy};
pub use list::NodeId;
pub use lru::{Access, LruTracker};
pub use metrics::TableMetrics;
