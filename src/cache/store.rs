//! Cache Store Module
//!
//! Thread-safe key-value cache with sliding and absolute expiration.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::{CacheEntry, CacheEntryOptions, CacheStats, Clock, SystemClock};

// == Population Ticket ==
/// Snapshot of the store's invalidation epoch, taken before a read-through fetch.
///
/// See [`CacheStore::set_with_ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
    /// Bumped by every `remove`, hit or miss
    epoch: u64,
}

// == Cache Store ==
/// In-memory cache shared by all request tasks.
///
/// All methods take `&self`; the map lives behind an internal mutex that is
/// never held across an await point. Expired entries are dropped lazily on
/// lookup and eagerly by [`CacheStore::cleanup_expired`].
#[derive(Debug)]
pub struct CacheStore<V> {
    inner: Mutex<Inner<V>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
                epoch: 0,
            }),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Try Get ==
    /// Returns a clone of the value stored at `key`, refreshing its sliding window.
    ///
    /// Expired entries are removed and reported as a miss.
    pub fn try_get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let mut guard = self.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.touch(now);
                let value = entry.value.clone();
                inner.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.entries.remove(key);
            inner.stats.record_expirations(1);
            let total = inner.entries.len();
            inner.stats.set_total_entries(total);
        }
        inner.stats.record_miss();
        None
    }

    // == Set ==
    /// Inserts or replaces the entry at `key`, restarting both expiration windows.
    pub fn set(&self, key: impl Into<String>, value: V, options: &CacheEntryOptions) {
        let now = self.clock.now_ms();
        let mut inner = self.lock();
        Self::insert(&mut inner, key.into(), value, options, now);
    }

    // == Ticket ==
    /// Captures the current invalidation epoch.
    pub fn ticket(&self) -> Ticket {
        Ticket(self.lock().epoch)
    }

    // == Set With Ticket ==
    /// Inserts the entry only if no `remove` has happened since `ticket` was taken.
    ///
    /// Returns whether the value was stored. A read-through caller takes the
    /// ticket before querying the backing store, so a value fetched before a
    /// concurrent write committed is dropped instead of outliving that write's
    /// invalidation.
    pub fn set_with_ticket(
        &self,
        key: impl Into<String>,
        value: V,
        options: &CacheEntryOptions,
        ticket: Ticket,
    ) -> bool {
        let now = self.clock.now_ms();
        let mut inner = self.lock();
        if inner.epoch != ticket.0 {
            return false;
        }
        Self::insert(&mut inner, key.into(), value, options, now);
        true
    }

    fn insert(inner: &mut Inner<V>, key: String, value: V, options: &CacheEntryOptions, now: u64) {
        inner.entries.insert(key, CacheEntry::new(value, options, now));
        let total = inner.entries.len();
        inner.stats.set_total_entries(total);
    }

    // == Remove ==
    /// Removes the entry at `key` if present. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) {
        let mut inner = self.lock();
        inner.epoch = inner.epoch.wrapping_add(1);
        if inner.entries.remove(key).is_some() {
            inner.stats.record_invalidation();
            let total = inner.entries.len();
            inner.stats.set_total_entries(total);
        }
    }

    // == Contains Key ==
    /// Reports whether a live entry exists at `key` without refreshing it.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.lock()
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut inner = self.lock();

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired(now));
        let after = inner.entries.len();

        let removed = before - after;
        inner.stats.record_expirations(removed);
        inner.stats.set_total_entries(after);
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use std::time::Duration;

    const MINUTE: Duration = Duration::from_secs(60);
    const HOUR: Duration = Duration::from_secs(3600);

    fn policy() -> CacheEntryOptions {
        CacheEntryOptions::new()
            .with_sliding_expiration(10 * MINUTE)
            .with_absolute_expiration(24 * HOUR)
    }

    fn store_with_clock() -> (CacheStore<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        (CacheStore::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let (store, _) = store_with_clock();

        store.set("key1", "value1".to_string(), &policy());

        assert_eq!(store.try_get("key1").as_deref(), Some("value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_missing_has_no_side_effect() {
        let (store, _) = store_with_clock();

        assert!(store.try_get("nonexistent").is_none());
        assert!(store.is_empty());
        assert!(!store.contains_key("nonexistent"));
    }

    #[test]
    fn test_store_overwrite_resets_timers() {
        let (store, clock) = store_with_clock();
        let absolute = CacheEntryOptions::new().with_absolute_expiration(24 * HOUR);

        store.set("key1", "value1".to_string(), &absolute);
        clock.advance(23 * HOUR);
        store.set("key1", "value2".to_string(), &absolute);
        clock.advance(2 * HOUR);

        // Past the first write's absolute deadline, inside the second's.
        assert_eq!(store.try_get("key1").as_deref(), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_remove() {
        let (store, _) = store_with_clock();

        store.set("key1", "value1".to_string(), &policy());
        store.remove("key1");

        assert!(store.is_empty());
        assert!(store.try_get("key1").is_none());
    }

    #[test]
    fn test_store_remove_missing_is_noop() {
        let (store, _) = store_with_clock();

        store.set("key1", "value1".to_string(), &policy());
        store.remove("nonexistent");

        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().invalidations, 0);
    }

    #[test]
    fn test_sliding_expiration_without_access() {
        let (store, clock) = store_with_clock();

        store.set("key1", "value1".to_string(), &policy());
        clock.advance(10 * MINUTE);

        assert!(store.try_get("key1").is_none());
        assert!(store.is_empty(), "expired entry is dropped on lookup");
    }

    #[test]
    fn test_sliding_expiration_refreshed_by_access() {
        let (store, clock) = store_with_clock();

        store.set("key1", "value1".to_string(), &policy());
        for _ in 0..5 {
            clock.advance(9 * MINUTE);
            assert!(store.try_get("key1").is_some());
        }
    }

    #[test]
    fn test_absolute_expiration_caps_continuous_access() {
        let (store, clock) = store_with_clock();

        store.set("key1", "value1".to_string(), &policy());
        let mut elapsed = Duration::ZERO;
        while elapsed + 5 * MINUTE < 24 * HOUR {
            clock.advance(5 * MINUTE);
            elapsed += 5 * MINUTE;
            assert!(store.try_get("key1").is_some(), "alive at {:?}", elapsed);
        }

        clock.advance(24 * HOUR - elapsed);
        assert!(store.try_get("key1").is_none());
    }

    #[test]
    fn test_contains_key_does_not_refresh() {
        let (store, clock) = store_with_clock();

        store.set("key1", "value1".to_string(), &policy());
        clock.advance(9 * MINUTE);
        assert!(store.contains_key("key1"));
        clock.advance(MINUTE);
        assert!(!store.contains_key("key1"));
    }

    #[test]
    fn test_set_with_ticket_rejected_after_remove() {
        let (store, _) = store_with_clock();

        let ticket = store.ticket();
        store.remove("category-1");

        assert!(!store.set_with_ticket("category-1", "stale".to_string(), &policy(), ticket));
        assert!(!store.contains_key("category-1"));

        let fresh = store.ticket();
        assert!(store.set_with_ticket("category-1", "fresh".to_string(), &policy(), fresh));
        assert_eq!(store.try_get("category-1").as_deref(), Some("fresh"));
    }

    #[test]
    fn test_set_with_ticket_unaffected_by_plain_set() {
        let (store, _) = store_with_clock();

        let ticket = store.ticket();
        store.set("other", "value".to_string(), &policy());

        assert!(store.set_with_ticket("key1", "value1".to_string(), &policy(), ticket));
    }

    #[test]
    fn test_store_stats() {
        let (store, clock) = store_with_clock();

        store.set("key1", "value1".to_string(), &policy());
        store.set("key2", "value2".to_string(), &policy());
        store.try_get("key1"); // hit
        store.try_get("nonexistent"); // miss
        store.remove("key2");
        clock.advance(11 * MINUTE);
        store.try_get("key1"); // expired miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.invalidations, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let (store, clock) = store_with_clock();

        let short = CacheEntryOptions::new().with_absolute_expiration(Duration::from_secs(1));
        store.set("key1", "value1".to_string(), &short);
        store.set("key2", "value2".to_string(), &policy());

        clock.advance(Duration::from_secs(2));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.try_get("key2").is_some());
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        let store: Arc<CacheStore<usize>> = Arc::new(CacheStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for j in 0..100 {
                        let key = format!("key-{}", j % 10);
                        store.set(key.clone(), i, &policy());
                        store.try_get(&key);
                        if j % 7 == 0 {
                            store.remove(&key);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(store.len() <= 10);
    }
}
