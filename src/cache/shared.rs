//! Shared Cache Handle
//!
//! Serializes concurrent access to one [`RecencyCache`] behind a single mutex.

use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{CacheStats, RecencyCache};
use crate::error::Result;

/// Cloneable handle to a cache shared by many tasks.
///
/// A plain mutex is used instead of a read/write lock since every `get`
/// reorders the recency list. Values are cloned out, so callers never hold a
/// reference into cache-owned state.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<RecencyCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Wraps a freshly constructed cache of the given capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_cache(RecencyCache::new(capacity)?))
    }

    pub fn from_cache(cache: RecencyCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Returns a copy of the cached value, refreshing its recency.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().await.get(key).cloned()
    }

    pub async fn put(&self, key: K, value: V) {
        self.inner.lock().await.put(key, value);
    }

    pub async fn delete(&self, key: &K) -> bool {
        self.inner.lock().await.delete(key)
    }

    // == Coordinated Access ==
    // The methods below run a caller-supplied backing-store operation while
    // the cache lock is held, so a load and a write on the same key cannot
    // interleave. The closures are synchronous and must not block for long.

    /// Returns the cached value, or runs `load` on a miss and caches what it
    /// finds. A load returning `None` leaves the cache untouched.
    pub async fn get_or_load<E, F>(&self, key: K, load: F) -> std::result::Result<Option<V>, E>
    where
        F: FnOnce() -> std::result::Result<Option<V>, E>,
    {
        let mut cache = self.inner.lock().await;
        if let Some(value) = cache.get(&key) {
            return Ok(Some(value.clone()));
        }

        let loaded = load()?;
        if let Some(value) = &loaded {
            cache.put(key, value.clone());
        }
        Ok(loaded)
    }

    /// Runs `write` and caches the entry it produces. Nothing is cached when
    /// `write` fails.
    pub async fn put_with<E, F>(&self, write: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> std::result::Result<(K, V), E>,
    {
        let mut cache = self.inner.lock().await;
        let (key, value) = write()?;
        cache.put(key, value.clone());
        Ok(value)
    }

    /// Runs `write` and drops the cached entry when it reports a removal.
    pub async fn delete_with<E, F>(&self, key: &K, write: F) -> std::result::Result<bool, E>
    where
        F: FnOnce() -> std::result::Result<bool, E>,
    {
        let mut cache = self.inner.lock().await;
        let removed = write()?;
        if removed {
            cache.delete(key);
        }
        Ok(removed)
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn assert_consistent(&self) {
        self.inner.lock().await.assert_consistent();
    }
}
