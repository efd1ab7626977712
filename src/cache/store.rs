//! Recency Cache Module
//!
//! Bounded key/value cache combining HashMap lookup with an arena-backed
//! recency list for least-recently-used eviction.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::cache::lru::{Handle, RecencyList};
use crate::cache::CacheStats;
use crate::error::{Result, ServiceError};

// == Recency Cache ==
/// Fixed-capacity cache evicting the least recently touched entry.
///
/// `get` (on a hit) and `put` both count as a touch. All three operations
/// run in O(1) amortized time.
#[derive(Debug)]
pub struct RecencyCache<K, V> {
    /// Key to node handle in the recency list
    index: HashMap<K, Handle>,
    /// Recency order, owns the stored values
    order: RecencyList<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of resident entries
    capacity: usize,
}

impl<K, V> RecencyCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Fails with [`ServiceError::InvalidCapacity`] when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ServiceError::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(capacity),
            capacity,
        })
    }

    // == Get ==
    /// Looks up a key, marking it most recently used on a hit.
    ///
    /// The returned reference is read-only and borrows the cache; clone it
    /// to keep the value beyond the next mutation.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.index.get(key) {
            Some(&handle) => {
                self.stats.record_hit();
                self.order.move_to_front(handle);
                self.order.value(handle)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Inserts or replaces a value and marks the key most recently used.
    ///
    /// A new key arriving at a full cache evicts exactly one entry, the least
    /// recently touched one.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(&handle) = self.index.get(&key) {
            if let Some(slot) = self.order.value_mut(handle) {
                *slot = value;
            }
            self.order.move_to_front(handle);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_oldest();
        }

        let handle = self.order.push_front(key.clone(), value);
        self.index.insert(key, handle);
    }

    // == Delete ==
    /// Removes a key if resident. Deleting an absent key is a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn delete(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(handle) => self.order.remove(handle).is_some(),
            None => false,
        }
    }

    // == Contains ==
    /// Checks residency without affecting recency.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == Peek LRU ==
    /// Returns the next eviction candidate without touching it.
    pub fn peek_lru(&self) -> Option<&K> {
        self.order.peek_back()
    }

    // == Keys ==
    /// Iterates resident keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.keys()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics. The resident count is
    /// taken from the index at call time.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_oldest(&mut self) {
        if let Some((evicted, _)) = self.order.pop_back() {
            self.index.remove(&evicted);
            self.stats.record_eviction();
            debug!(capacity = self.capacity, "evicted least recently used entry");
        }
    }

    /// Panics unless the lookup map and the recency list agree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let keys: Vec<&K> = self.order.keys().collect();
        assert_eq!(keys.len(), self.order.len(), "recency list length drifted");
        assert_eq!(keys.len(), self.index.len(), "map and list sizes differ");
        assert!(self.index.len() <= self.capacity, "capacity exceeded");
        for key in keys {
            assert!(self.index.contains_key(key), "orphaned key in recency list");
        }
    }
}
