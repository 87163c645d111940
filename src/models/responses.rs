//! Response DTOs for the command driver
//!
//! Each command answers with one JSON object.

use serde::Serialize;

use crate::cache::CacheStats;

/// Reply to `add`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddResponse {
    /// The key that was written
    pub key: String,
    /// Keys evicted to make room, oldest first
    pub evicted: Vec<String>,
}

/// Reply to `get` and `peek`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Reply to `remove`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoveResponse {
    pub key: String,
    /// Whether the key was resident
    pub removed: bool,
}

/// Reply to `oldest`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvictResponse {
    /// Evicted keys, empty when the cache was already empty
    pub evicted: Vec<String>,
}

/// Reply to `len`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LenResponse {
    pub len: usize,
}

/// Reply to `stats`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Bytes charged to the cache
    pub used_bytes: usize,
    /// Byte budget, 0 = unbounded
    pub max_bytes: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            used_bytes: stats.used_bytes,
            max_bytes: stats.max_bytes,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Any successful reply, serialized without a wrapper tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Add(AddResponse),
    Get(GetResponse),
    Remove(RemoveResponse),
    Evict(EvictResponse),
    Len(LenResponse),
    Stats(StatsResponse),
}
