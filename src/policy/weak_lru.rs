//! # Weak-Reference LRU Cache
//!
//! An LRU cache that indexes values it does not own. `put` stores the weak
//! half of a shared pointer (`Rc<T>` / `Arc<T>`), so the cache never keeps a
//! value alive; whoever holds the strong pointer decides when it is dropped.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                       WeakLruCache<K, P>                             │
//!   │                                                                      │
//!   │   FxHashMap<K, SlotId> ──► RecencyList<Entry<K, P::Weak>>            │
//!   │                                                                      │
//!   │   head ──► [k1: Weak ✓] ◄──► [k2: Weak ✗] ◄──► [k3: Weak ✓] ◄── tail │
//!   │             (MRU)              expired               (LRU)           │
//!   └──────────────────────────────────────────────────────────────────────┘
//!            ▲                          ▲
//!            │ strong                   │ dropped by its owner
//!   ┌────────┴───────┐          ┌───────┴────────┐
//!   │ caller: Arc<T> │          │  (freed)       │
//!   └────────────────┘          └────────────────┘
//! ```
//!
//! ## Expiry
//!
//! Expiry is observable but passive:
//!
//! - `get` on an expired entry still reports the key as present and returns
//!   [`Lookup::Expired`]; the entry is promoted like any other hit.
//! - Expired entries keep their slot and their place in recency order, and are
//!   evicted in the normal LRU sequence.
//! - Slots are reclaimed only through [`delete`](WeakLruCache::delete),
//!   eviction, or an explicit [`purge_expired`](WeakLruCache::purge_expired).
//!
//! ## Methods
//!
//! | Method              | Complexity | Description                            |
//! |---------------------|------------|----------------------------------------|
//! | `try_new(capacity)` | O(1)       | Fallible constructor, capacity ≥ 2     |
//! | `get(&k)`           | O(1)       | Live / Expired, promote to MRU         |
//! | `peek(&k)`          | O(1)       | Live / Expired, recency untouched      |
//! | `put(k, &p)`        | O(1)       | Store `downgrade(p)`, may evict one    |
//! | `delete(&k)`        | O(1)       | Remove entry, report presence          |
//! | `is_expired(&k)`    | O(1)       | Expiry check without promotion         |
//! | `purge_expired()`   | O(n)       | Delete every expired entry             |
//! | `keys()`            | O(n)       | Keys MRU → LRU                         |
//!
//! ## Thread Safety
//!
//! Not synchronized. `WeakLruCache<K, Arc<T>>` is `Send` when `K` and `T` are
//! `Send + Sync`, so it can be shared behind a lock; the `Rc` flavour stays
//! on one thread. With `Arc`, another thread may drop the last strong pointer
//! between two calls, so treat [`Lookup::Live`] as a point-in-time answer. The
//! pointer it carries keeps the value alive while held.
//!
//! ## Example Usage
//!
//! ```
//! use std::rc::Rc;
//! use lrukit::policy::weak_lru::{Lookup, RcWeakLruCache};
//!
//! let mut cache: RcWeakLruCache<&str, String> = RcWeakLruCache::try_new(4)?;
//!
//! let page = Rc::new(String::from("page body"));
//! cache.put("index", &page);
//! assert!(matches!(cache.get(&"index"), Some(Lookup::Live(p)) if Rc::ptr_eq(&p, &page)));
//!
//! drop(page);
//! assert_eq!(cache.get(&"index"), Some(Lookup::Expired));
//! assert_eq!(cache.len(), 1); // expiry alone does not free the slot
//! # Ok::<(), lrukit::error::ConfigError>(())
//! ```

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{ConfigError, InvariantError};
use crate::policy::lru_core::{LruCore, PutOutcome};
use crate::store::SharedPointer;
use crate::traits::{CacheConfig, CoreCache, LruCacheTrait};

/// Smallest capacity [`WeakLruCache`] accepts.
pub const MIN_CAPACITY: usize = 2;

/// Weak-value LRU cache over `Rc` pointers.
pub type RcWeakLruCache<K, V> = WeakLruCache<K, Rc<V>>;

/// Weak-value LRU cache over `Arc` pointers.
pub type ArcWeakLruCache<K, V> = WeakLruCache<K, Arc<V>>;

/// What a weak-cache hit resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<P> {
    /// The value is still owned elsewhere; here is a fresh strong pointer.
    Live(P),
    /// Every strong pointer has been dropped. The key is still indexed.
    Expired,
}

impl<P> Lookup<P> {
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self, Lookup::Live(_))
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        matches!(self, Lookup::Expired)
    }

    /// Converts into the strong pointer, if live.
    #[inline]
    pub fn live(self) -> Option<P> {
        match self {
            Lookup::Live(p) => Some(p),
            Lookup::Expired => None,
        }
    }

    #[inline]
    pub fn as_live(&self) -> Option<&P> {
        match self {
            Lookup::Live(p) => Some(p),
            Lookup::Expired => None,
        }
    }
}

impl<P: SharedPointer> Lookup<P> {
    fn resolve(weak: &P::Weak) -> Self {
        match P::upgrade(weak) {
            Some(strong) => Lookup::Live(strong),
            None => Lookup::Expired,
        }
    }
}

/// Fixed-capacity LRU cache holding weak observations of shared values.
///
/// `P` is the strong pointer type callers hold, usually `Rc<T>` or `Arc<T>`
/// (see [`RcWeakLruCache`] and [`ArcWeakLruCache`]).
pub struct WeakLruCache<K, P: SharedPointer> {
    core: LruCore<K, P::Weak>,
}

impl<K, P> WeakLruCache<K, P>
where
    K: Eq + Hash + Clone,
    P: SharedPointer,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is below [`MIN_CAPACITY`].
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_config(CacheConfig::with_capacity(capacity))
    }

    /// Creates a cache from a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config.capacity` is below [`MIN_CAPACITY`].
    pub fn try_with_config(config: CacheConfig) -> Result<Self, ConfigError> {
        if config.capacity < MIN_CAPACITY {
            debug!(
                capacity = config.capacity,
                minimum = MIN_CAPACITY,
                "rejected weak LRU cache configuration"
            );
            return Err(ConfigError::capacity_below(MIN_CAPACITY, config.capacity));
        }
        Ok(Self {
            core: LruCore::with_config(&config),
        })
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is below [`MIN_CAPACITY`]. See
    /// [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Returns the number of indexed keys, expired ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.core.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// Returns `true` if the key is indexed, whether or not its value expired.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.core.contains(key)
    }

    /// Looks up `key` and marks it most-recently-used.
    ///
    /// Returns `None` only when the key is not indexed. A hit whose value has
    /// been dropped returns `Some(Lookup::Expired)` and is promoted all the
    /// same.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<Lookup<P>> {
        self.core.get(key).map(|weak| Lookup::<P>::resolve(weak))
    }

    /// Looks up `key` without changing recency order.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<Lookup<P>> {
        self.core.peek(key).map(Lookup::<P>::resolve)
    }

    /// Reports whether `key`'s value has been dropped, without promoting it.
    ///
    /// `None` if the key is not indexed.
    #[inline]
    pub fn is_expired(&self, key: &K) -> Option<bool> {
        self.core.peek(key).map(P::is_expired)
    }

    /// Indexes a weak observation of `value` under `key`.
    ///
    /// The cache does not extend the value's lifetime. An existing key has its
    /// observation replaced and is promoted; the previous observation is
    /// returned resolved. A new key goes to the head, and if that overflows
    /// the capacity the least-recently-used entry is evicted, expired or not.
    pub fn put(&mut self, key: K, value: &P) -> Option<Lookup<P>> {
        match self.core.put(key, P::downgrade(value)) {
            PutOutcome::Updated(old) => Some(Lookup::resolve(&old)),
            PutOutcome::Inserted { .. } => None,
        }
    }

    /// Removes `key` from the index and the recency list.
    ///
    /// Returns whether the key was present.
    pub fn delete(&mut self, key: &K) -> bool {
        self.core.remove(key).is_some()
    }

    /// Marks `key` most-recently-used without resolving it.
    #[inline]
    pub fn touch(&mut self, key: &K) -> bool {
        self.core.touch(key)
    }

    /// Removes and returns the least-recently-used entry.
    pub fn pop_lru(&mut self) -> Option<(K, Lookup<P>)> {
        self.core
            .pop_lru()
            .map(|(key, weak)| (key, Lookup::resolve(&weak)))
    }

    /// Position of `key` in recency order, `0` being most-recently-used.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.core.recency_rank(key)
    }

    /// Keys from most- to least-recently-used.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.core.iter().map(|(key, _)| key)
    }

    /// Counts indexed entries whose value has been dropped. O(n).
    pub fn expired_count(&self) -> usize {
        self.core
            .iter()
            .filter(|(_, weak)| P::is_expired(weak))
            .count()
    }

    /// Deletes every expired entry and returns how many were removed.
    ///
    /// Live entries keep their relative recency order. Never called
    /// implicitly.
    pub fn purge_expired(&mut self) -> usize {
        let purged = self.core.retain(|_, weak| !P::is_expired(weak));
        trace!(purged, remaining = self.core.len(), "purged expired entries");
        purged
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Verifies that the key index and the recency list agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.core.check_invariants()
    }
}

impl<K, P> CoreCache<K> for WeakLruCache<K, P>
where
    K: Eq + Hash + Clone,
    P: SharedPointer,
{
    fn len(&self) -> usize {
        WeakLruCache::len(self)
    }

    fn capacity(&self) -> usize {
        WeakLruCache::capacity(self)
    }

    fn contains(&self, key: &K) -> bool {
        WeakLruCache::contains(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        WeakLruCache::delete(self, key)
    }

    fn clear(&mut self) {
        WeakLruCache::clear(self)
    }
}

impl<K, P> LruCacheTrait<K> for WeakLruCache<K, P>
where
    K: Eq + Hash + Clone,
    P: SharedPointer,
{
    fn touch(&mut self, key: &K) -> bool {
        WeakLruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        WeakLruCache::recency_rank(self, key)
    }

    fn lru_key(&self) -> Option<&K> {
        self.core.lru_key()
    }
}

impl<K, P> fmt::Debug for WeakLruCache<K, P>
where
    K: Eq + Hash + Clone,
    P: SharedPointer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakLruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
