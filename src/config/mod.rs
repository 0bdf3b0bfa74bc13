//! Configuration Module
//!
//! Configuration structures for the containers in this crate. Each container has
//! its own dedicated configuration struct with public fields.
//!
//! | Config | Container | Description |
//! |--------|-----------|-------------|
//! | `LruTrackerConfig` | [`LruTracker`](crate::LruTracker) | Exact LRU residency tracking |
//! | `DictionaryConfig` | [`HashTableDictionary`](crate::HashTableDictionary) | Open-addressing key set |
//!
//! # Examples
//!
//! ```
//! use lru_trace::config::DictionaryConfig;
//! use lru_trace::{HashTableDictionary, ProbeStrategy};
//! use core::num::NonZeroUsize;
//!
//! let config = DictionaryConfig {
//!     capacity: NonZeroUsize::new(1279).unwrap(),
//!     strategy: ProbeStrategy::Double,
//!     track_stats: true,
//! };
//! let table = HashTableDictionary::init(config);
//! assert_eq!(table.capacity(), 1279);
//! ```

pub mod dictionary;
pub mod lru;

pub use dictionary::DictionaryConfig;
pub use lru::LruTrackerConfig;
