//! # Cache Trait Hierarchy
//!
//! Traits shared by the owned-value and weak-value LRU caches. The two caches
//! differ in what `get`/`put` accept and return (an owned `V` versus a weak
//! observation of a shared pointer), so those stay inherent methods. Everything
//! that only depends on keys and recency order lives here, which lets generic
//! code and tests drive either cache through one interface.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K>                 │
//!   │                                         │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  contains(&, &K) → bool                 │
//!   │  delete(&mut, &K) → bool                │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K>               │
//!   │                                         │
//!   │  touch(&mut, &K) → bool                 │
//!   │  recency_rank(&, &K) → Option<usize>    │
//!   │  lru_key(&) → Option<&K>                │
//!   └─────────────────────────────────────────┘
//!          ▲                         ▲
//!          │                         │
//!   LruCache<K, V>           WeakLruCache<K, P>
//! ```
//!
//! ## CacheConfig
//!
//! | Field             | Type    | Default | Description                      |
//! |-------------------|---------|---------|----------------------------------|
//! | `capacity`        | `usize` | 1000    | Maximum entries                  |
//! | `prealloc_memory` | `bool`  | true    | Reserve index and arena up front |
//!
//! ## Thread Safety
//!
//! None of the caches synchronize internally. Wrap them in a lock
//! (e.g. `parking_lot::Mutex`) to share them between threads.

/// Core operations every cache in this crate supports.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// fn invalidate<C: CoreCache<u64>>(cache: &mut C, keys: &[u64]) -> usize {
///     keys.iter().filter(|key| cache.delete(key)).count()
/// }
///
/// let mut cache = LruCache::new(8);
/// cache.put(1, "one");
/// cache.put(2, "two");
/// assert_eq!(invalidate(&mut cache, &[1, 3]), 1);
/// assert_eq!(cache.len(), 1);
/// ```
pub trait CoreCache<K> {
    /// Returns the number of entries currently indexed.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Returns `true` if `key` is indexed. Does not update recency.
    fn contains(&self, key: &K) -> bool;

    /// Removes `key` and its node. Returns whether the key was present.
    fn delete(&mut self, key: &K) -> bool;

    /// Removes every entry.
    fn clear(&mut self);
}

/// Recency-order operations shared by the LRU caches.
pub trait LruCacheTrait<K>: CoreCache<K> {
    /// Promotes `key` to most-recently-used without reading its value.
    ///
    /// Returns `false` if the key is absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` being most-recently-used.
    ///
    /// O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;

    /// Key that the next overflowing insert would evict.
    fn lru_key(&self) -> Option<&K>;
}

/// Construction parameters shared by every cache.
///
/// # Example
///
/// ```
/// use lrukit::traits::CacheConfig;
///
/// let config = CacheConfig { capacity: 64, ..CacheConfig::default() };
/// assert!(config.prealloc_memory);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    pub capacity: usize,

    /// Reserve the key index and node arena for `capacity` entries up front.
    ///
    /// When false, both grow on demand.
    pub prealloc_memory: bool,
}

impl CacheConfig {
    /// Creates a config with the given capacity and default settings.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Number of entries to reserve at construction time.
    pub(crate) fn initial_reservation(&self) -> usize {
        if self.prealloc_memory {
            self.capacity
        } else {
            0
        }
    }
}

impl Default for CacheConfig {
    /// Defaults:
    /// - `capacity`: 1000
    /// - `prealloc_memory`: true
    fn default() -> Self {
        Self {
            capacity: 1000,
            prealloc_memory: true,
        }
    }
}
