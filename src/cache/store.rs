//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the LRU access list and
//! byte-budget accounting.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, LruList, NodeId, Value, UNBOUNDED};

/// Callback invoked with the owned key and value of every evicted entry.
pub type OnEvicted<V> = Box<dyn FnMut(String, V) + Send>;

// == Cache ==
/// LRU cache bounded by the total byte size of its keys and values.
///
/// Every resident key appears exactly once in both the index and the access
/// list, and `used_bytes` always equals the sum of `key.len() + value.byte_len()`
/// over resident entries. After `add` returns, `used_bytes <= max_bytes`
/// unless the cache is unbounded.
///
/// The cache does no locking of its own. Wrap it in a mutex to share it.
pub struct Cache<V> {
    /// Entries ordered from most to least recently used
    order: LruList<CacheEntry<V>>,
    /// Key to list node lookup
    index: HashMap<String, NodeId>,
    /// Byte budget, 0 = unbounded
    max_bytes: usize,
    /// Bytes currently charged
    used_bytes: usize,
    /// Eviction observer
    on_evicted: Option<OnEvicted<V>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Value> Cache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `max_bytes` - Byte budget for keys plus values, 0 disables eviction
    /// * `on_evicted` - Optional callback run for each entry removed from the
    ///   least recently used end
    pub fn new(max_bytes: usize, on_evicted: Option<OnEvicted<V>>) -> Self {
        let stats = CacheStats {
            max_bytes,
            ..CacheStats::default()
        };
        Self {
            order: LruList::new(),
            index: HashMap::new(),
            max_bytes,
            used_bytes: 0,
            on_evicted,
            stats,
        }
    }

    /// Creates an empty cache that never evicts.
    pub fn unbounded() -> Self {
        Self::new(UNBOUNDED, None)
    }

    /// Creates an empty cache with an eviction callback.
    pub fn with_eviction_callback<F>(max_bytes: usize, on_evicted: F) -> Self
    where
        F: FnMut(String, V) + Send + 'static,
    {
        Self::new(max_bytes, Some(Box::new(on_evicted)))
    }

    // == Add ==
    /// Inserts or updates a key, marking it most recently used.
    ///
    /// Updating a resident key replaces its value and charges only the size
    /// difference. Afterwards, least recently used entries are evicted until
    /// the cache fits its budget again. A value larger than the whole budget
    /// ends up evicting everything, itself included.
    ///
    /// # Panics
    /// Panics if the charged total would overflow `usize`, which only a
    /// [`Value`] reporting an absurd `byte_len` can cause.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(&id) = self.index.get(&key) {
            self.order.move_to_front(id);
            if let Some(entry) = self.order.get_mut(id) {
                let new_len = value.byte_len();
                let old = entry.replace_value(value);
                self.used_bytes -= old.byte_len();
                self.charge(new_len);
            }
        } else {
            self.charge(key.len());
            self.charge(value.byte_len());
            let id = self.order.push_front(CacheEntry::new(key.clone(), value));
            self.index.insert(key, id);
        }

        while self.over_budget() && !self.order.is_empty() {
            self.remove_oldest();
        }
    }

    // == Get ==
    /// Looks up a key, marking it most recently used on a hit.
    ///
    /// Never evicts and never changes the byte usage.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        match self.index.get(key).copied() {
            Some(id) => {
                self.order.move_to_front(id);
                self.stats.record_hit();
                trace!(key, "cache hit");
                self.order.get(id).map(|entry| &entry.value)
            }
            None => {
                self.stats.record_miss();
                trace!(key, "cache miss");
                None
            }
        }
    }

    // == Peek ==
    /// Looks up a key without touching recency or statistics.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let id = self.index.get(key)?;
        self.order.get(*id).map(|entry| &entry.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry. No-op on an empty cache.
    ///
    /// The entry is fully removed before the eviction callback runs, and the
    /// callback takes ownership of the key and value.
    pub fn remove_oldest(&mut self) {
        let Some(entry) = self.order.pop_back() else {
            return;
        };

        let charged = entry.charged_bytes();
        self.index.remove(&entry.key);
        self.used_bytes -= charged;
        self.stats.record_eviction();
        debug!(
            key = %entry.key,
            bytes = charged,
            used_bytes = self.used_bytes,
            "evicted least recently used entry"
        );

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            let (key, value) = entry.into_parts();
            on_evicted(key, value);
        }
    }

    // == Remove ==
    /// Removes a key and hands back its value.
    ///
    /// Explicit removal is not an eviction: the callback does not run.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;
        self.used_bytes -= entry.charged_bytes();
        Some(entry.value)
    }

    // == Length ==
    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the bytes currently charged to the cache.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Iterates resident keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(|entry| entry.key.as_str())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_usage(self.len(), self.used_bytes);
        stats
    }

    fn charge(&mut self, bytes: usize) {
        self.used_bytes = match self.used_bytes.checked_add(bytes) {
            Some(total) => total,
            None => panic!(
                "byte accounting overflow: {} used + {} charged exceeds usize",
                self.used_bytes, bytes
            ),
        };
    }

    fn over_budget(&self) -> bool {
        self.max_bytes != UNBOUNDED && self.used_bytes > self.max_bytes
    }

    /// Panics unless the index, the list and the byte count agree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.order.assert_links();
        assert_eq!(self.index.len(), self.order.len(), "index and list sizes differ");

        for (key, id) in &self.index {
            let entry = self.order.get(*id).expect("index points at a free slot");
            assert_eq!(&entry.key, key, "index points at the wrong entry");
        }

        let charged: usize = self.order.iter().map(CacheEntry::charged_bytes).sum();
        assert_eq!(self.used_bytes, charged, "byte accounting drifted");

        if self.max_bytes != UNBOUNDED {
            assert!(self.used_bytes <= self.max_bytes, "cache over budget");
        }
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("len", &self.order.len())
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("on_evicted", &self.on_evicted.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}
