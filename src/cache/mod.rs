//! Cache Module
//!
//! Provides an in-memory LRU cache bounded by a byte budget.

mod entry;
mod lru;
mod stats;
mod store;
mod value;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{LruList, NodeId};
pub use stats::CacheStats;
pub use store::{Cache, OnEvicted};
pub use value::Value;

// == Public Constants ==
/// Capacity value that disables eviction
pub const UNBOUNDED: usize = 0;
