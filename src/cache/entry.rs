//! Cache Entry Module
//!
//! Defines the key/value pair stored in the access-order list.

use crate::cache::Value;

// == Cache Entry ==
/// A single resident key/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    /// The lookup key
    pub key: String,
    /// The stored value
    pub value: V,
}

impl<V: Value> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: String, value: V) -> Self {
        Self { key, value }
    }

    // == Charged Size ==
    /// Returns the number of bytes this entry is charged against the budget.
    ///
    /// Both the key and the value count: `key.len() + value.byte_len()`.
    pub fn charged_bytes(&self) -> usize {
        self.key.len() + self.value.byte_len()
    }

    // == Replace Value ==
    /// Swaps in a new value and returns the old one.
    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Consumes the entry, returning the owned key and value.
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}
