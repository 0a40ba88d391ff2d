//! Keyed TTL cache that remembers expired entries as last-known-good.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// A cache whose entries go stale after `ttl` but stay readable as fallback.
///
/// [`get_fresh`](TtlCache::get_fresh) only returns entries younger than the
/// TTL; [`get_stale`](TtlCache::get_stale) returns whatever was stored last,
/// which is what callers fall back to when a refresh fails. Callers pass the
/// current instant so expiry can be tested without sleeping.
///
/// A cache built with [`bounded`](TtlCache::bounded) holds at most
/// `max_entries` keys. Inserting a new key into a full cache first drops
/// expired entries, then the oldest one if it is still full.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    max_entries: usize,
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::bounded(ttl, usize::MAX)
    }

    /// A cache that never holds more than `max_entries` keys (minimum 1).
    #[must_use]
    pub fn bounded(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the value for `key` if it was stored less than `ttl` before `now`.
    pub async fn get_fresh(&self, key: &K, now: Instant) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.fetched_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Returns the last value stored for `key`, regardless of age.
    pub async fn get_stale(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries.get(key).map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: K, value: V, now: Instant) {
        let mut entries = self.entries.write().await;
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            self.make_room(&mut entries, now);
        }
        entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: now,
            },
        );
    }

    fn make_room(&self, entries: &mut HashMap<K, CacheEntry<V>>, now: Instant) {
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.fetched_at) < self.ttl);
        while entries.len() >= self.max_entries {
            let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            entries.remove(&oldest);
        }
        tracing::debug!(
            evicted = before - entries.len(),
            max_entries = self.max_entries,
            "cache full; evicted entries"
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
