//! Optional memoization for calculation steps.
//!
//! The engine is pure and cheap, so nothing depends on a cache for
//! correctness. A [`MemoCache`] can be injected into
//! [`crate::calculation::CommissionEngine`] to memoize performance modifiers
//! for vendors that are evaluated repeatedly.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// A key/value memo store.
///
/// Implementations must be safe to share between threads; the engine holds
/// the cache behind an `Arc`.
pub trait MemoCache<K, V>: Send + Sync {
    /// Returns the cached value for `key`, if present and not expired.
    fn get(&self, key: &K) -> Option<V>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: K, value: V);

    /// Removes the entry for `key`.
    fn expire(&self, key: &K);
}

/// An in-memory cache whose entries expire a fixed time after insertion.
///
/// Expired entries are dropped lazily on lookup, or eagerly through
/// [`TtlCache::purge_expired`].
///
/// # Example
///
/// ```
/// use commission_engine::cache::{MemoCache, TtlCache};
/// use std::time::Duration;
///
/// let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
/// cache.set("vendor_001".to_string(), 7);
/// assert_eq!(cache.get(&"vendor_001".to_string()), Some(7));
/// ```
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (V, Instant)>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, including any not yet purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.lock()
            .retain(|_, (_, inserted)| now.duration_since(*inserted) < self.ttl);
    }

    // A poisoned lock only means another thread panicked mid-insert; the map
    // itself is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<K, (V, Instant)>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<K, V> MemoCache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.lock();
        let lookup = entries
            .get(key)
            .map(|(value, inserted)| (inserted.elapsed() < self.ttl).then(|| value.clone()));
        match lookup {
            Some(Some(value)) => Some(value),
            Some(None) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: K, value: V) {
        self.lock().insert(key, (value, Instant::now()));
    }

    fn expire(&self, key: &K) {
        self.lock().remove(key);
    }
}
