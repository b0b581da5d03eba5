//! Bounded memoisation of generated zones.
//!
//! Zones are generated on first access instead of all at startup. The cache
//! only saves work; [`zone_info`] alone always gives the same answer.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::world::{zone_info, ZoneCoord, ZoneInfo};

/// Default number of zones kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Hit/miss counters of a [`ZoneCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that generated the zone.
    pub misses: u64,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<ZoneCoord, Arc<ZoneInfo>>,
    /// Insertion order, oldest first.
    order: VecDeque<ZoneCoord>,
}

/// Thread-safe, bounded cache of generated zones.
///
/// Once full, the oldest inserted zone is evicted first.
#[derive(Debug)]
pub struct ZoneCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for ZoneCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ZoneCache {
    /// Create a cache holding at most `capacity` zones.
    ///
    /// A capacity of zero disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get a zone, generating it on first access.
    pub fn get(&self, zone: ZoneCoord) -> Arc<ZoneInfo> {
        if let Some(info) = self.lock().entries.get(&zone) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(info);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);

        // Generate outside the lock; a racing caller may do the same work,
        // the first insert wins and both get identical data.
        let generated = Arc::new(zone_info(zone));
        if self.capacity == 0 {
            return generated;
        }

        let mut inner = self.lock();
        if let Some(existing) = inner.entries.get(&zone) {
            return Arc::clone(existing);
        }

        while inner.entries.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            trace!(zone = %oldest, "evicted zone from cache");
        }

        inner.entries.insert(zone, Arc::clone(&generated));
        inner.order.push_back(zone);
        generated
    }

    /// Number of cached zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Check if no zone is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a zone is currently cached.
    #[must_use]
    pub fn contains(&self, zone: ZoneCoord) -> bool {
        self.lock().entries.contains_key(&zone)
    }

    /// Current hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        // Entries are immutable once inserted, a poisoned lock holds valid data
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(x: i32, y: i32) -> ZoneCoord {
        ZoneCoord::new(x, y).unwrap()
    }

    #[test]
    fn test_cache_hit_returns_same_zone() {
        let cache = ZoneCache::new(4);
        let first = cache.get(zone(2, 2));
        let second = cache.get(zone(2, 2));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_cache_matches_direct_generation() {
        let cache = ZoneCache::new(4);
        assert_eq!(*cache.get(zone(-3, 5)), zone_info(zone(-3, 5)));
    }

    #[test]
    fn test_cache_evicts_oldest() {
        let cache = ZoneCache::new(2);
        cache.get(zone(1, 0));
        cache.get(zone(2, 0));
        cache.get(zone(3, 0));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(zone(1, 0)));
        assert!(cache.contains(zone(2, 0)));
        assert!(cache.contains(zone(3, 0)));
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let cache = ZoneCache::new(0);
        cache.get(zone(1, 1));
        cache.get(zone(1, 1));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(ZoneCache::new(16));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let z = zone(i % 3, 1);
                    (cache.get(z).level, zone_info(z).level)
                })
            })
            .collect();
        for handle in handles {
            let (cached, fresh) = handle.join().unwrap();
            assert_eq!(cached, fresh);
        }
        assert_eq!(cache.len(), 3);
    }
}
