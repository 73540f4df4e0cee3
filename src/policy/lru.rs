//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity cache that owns its values. Every lookup or write moves the
//! touched entry to the most-recently-used end; inserting a new key into a
//! full cache evicts exactly one entry from the least-recently-used end.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (key index)                           │   │
//!   │   │                                                              │   │
//!   │   │   key_a ──────────────┐                                      │   │
//!   │   │   key_b ───────────┐  │                                      │   │
//!   │   │   key_c ────────┐  │  │                                      │   │
//!   │   └─────────────────┼──┼──┼──────────────────────────────────────┘   │
//!   │                     ▼  ▼  ▼                                          │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<Entry<K, V>>  (SlotArena-backed)                │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [a] ◄──► [b] ◄──► [c] ◄── tail                     │   │
//!   │   │   (MRU)                          (LRU)                       │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   PUT new key (cache full, capacity = 3)
//!   ═══════════════════════════════════════════════════════════════════════
//!
//!     Before:  head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!
//!     put(D):  1. link [D] at head       (len 4 > capacity 3)
//!              2. unlink [C] from tail, drop its key from the index
//!
//!     After:   head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   GET existing key
//!   ═══════════════════════════════════════════════════════════════════════
//!
//!     get(B):  index lookup O(1), move [B] to head O(1)
//!
//!     After:   head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! ## Methods
//!
//! | Method              | Complexity | Description                            |
//! |---------------------|------------|----------------------------------------|
//! | `try_new(capacity)` | O(1)       | Fallible constructor, capacity ≥ 1     |
//! | `get(&k)`           | O(1)       | Read value, promote to MRU             |
//! | `peek(&k)`          | O(1)       | Read value, recency untouched          |
//! | `put(k, v)`         | O(1)       | Insert or update, may evict one LRU    |
//! | `delete(&k)`        | O(1)       | Remove entry, report presence          |
//! | `remove(&k)`        | O(1)       | Remove entry, return owned value       |
//! | `touch(&k)`         | O(1)       | Promote without reading                |
//! | `pop_lru()`         | O(1)       | Remove and return the LRU entry        |
//! | `recency_rank(&k)`  | O(n)       | Position in recency order (0 = MRU)    |
//! | `iter()`            | O(n)       | Entries MRU → LRU, no promotion        |
//!
//! ## Thread Safety
//!
//! `LruCache` is not synchronized. It is `Send`/`Sync` whenever `K` and `V`
//! are, so it can sit behind a `Mutex` when shared.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::try_new(2)?;
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);
//! cache.put(3, "three"); // evicts 2, the least recently touched
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&"one"));
//! assert_eq!(cache.get(&3), Some(&"three"));
//! # Ok::<(), lrukit::error::ConfigError>(())
//! ```

use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::error::{ConfigError, InvariantError};
use crate::policy::lru_core::{LruCore, PutOutcome};
use crate::traits::{CacheConfig, CoreCache, LruCacheTrait};

/// Smallest capacity [`LruCache`] accepts.
pub const MIN_CAPACITY: usize = 1;

/// Fixed-capacity LRU cache that owns its values.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// assert_eq!(cache.put("a", 1), None);
/// assert_eq!(cache.put("a", 2), Some(1)); // update returns the old value
/// assert_eq!(cache.len(), 1);
/// ```
pub struct LruCache<K, V> {
    core: LruCore<K, V>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_config(CacheConfig::with_capacity(capacity))
    }

    /// Creates a cache from a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config.capacity` is zero.
    pub fn try_with_config(config: CacheConfig) -> Result<Self, ConfigError> {
        if config.capacity < MIN_CAPACITY {
            debug!(
                capacity = config.capacity,
                minimum = MIN_CAPACITY,
                "rejected LRU cache configuration"
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
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns `true` if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.core.len() == 0
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// Returns `true` if the key is cached. Does not update recency.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.core.contains(key)
    }

    /// Returns the value for `key` and marks it most-recently-used.
    ///
    /// A miss has no side effect.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.put(1, 1);
    /// assert_eq!(cache.get(&0), None);
    /// assert_eq!(cache.get(&1), Some(&1));
    /// ```
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.core.get(key).map(|value| &*value)
    }

    /// Mutable variant of [`get`](Self::get). Also promotes the entry.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.core.get(key)
    }

    /// Returns the value for `key` without changing recency order.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.core.peek(key)
    }

    /// Inserts or updates `key`, returning the previous value on update.
    ///
    /// Either way the entry becomes most-recently-used. Inserting a new key
    /// into a full cache evicts exactly one entry, the least-recently-used.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.core.put(key, value) {
            PutOutcome::Updated(old) => Some(old),
            PutOutcome::Inserted { .. } => None,
        }
    }

    /// Removes `key`, returning whether it was present.
    pub fn delete(&mut self, key: &K) -> bool {
        self.core.remove(key).is_some()
    }

    /// Removes `key` and hands back its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.core.remove(key)
    }

    /// Marks `key` most-recently-used without reading it.
    #[inline]
    pub fn touch(&mut self, key: &K) -> bool {
        self.core.touch(key)
    }

    /// Removes and returns the least-recently-used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.core.pop_lru()
    }

    /// Returns the least-recently-used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.core.peek_lru()
    }

    /// Position of `key` in recency order, `0` being most-recently-used.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.core.recency_rank(key)
    }

    /// Iterates entries from most- to least-recently-used.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> {
        self.core.iter()
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

impl<K, V> CoreCache<K> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        LruCache::delete(self, key)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> LruCacheTrait<K> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }

    fn lru_key(&self) -> Option<&K> {
        self.core.lru_key()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order<V>(cache: &LruCache<u32, V>) -> Vec<u32> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    // ==============================================
    // CORRECTNESS TESTS MODULE
    // ==============================================
    mod correctness {
        use super::*;

        mod construction {
            use super::*;

            #[test]
            fn test_zero_capacity_is_rejected() {
                let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
                assert!(err.message().contains("at least 1"));
            }

            #[test]
            #[should_panic(expected = "cache capacity must be at least 1")]
            fn test_new_panics_on_zero_capacity() {
                let _ = LruCache::<u32, u32>::new(0);
            }

            #[test]
            fn test_capacity_one_is_accepted() {
                let cache = LruCache::<u32, u32>::try_new(1).unwrap();
                assert_eq!(cache.capacity(), 1);
                assert!(cache.is_empty());
            }

            #[test]
            fn test_config_without_prealloc() {
                let config = CacheConfig {
                    capacity: 8,
                    prealloc_memory: false,
                };
                let mut cache = LruCache::try_with_config(config).unwrap();
                for i in 0..20u32 {
                    cache.put(i, i);
                }
                assert_eq!(cache.len(), 8);
            }
        }

        mod basic_behavior {
            use super::*;

            #[test]
            fn test_get_on_empty_cache() {
                let mut cache: LruCache<String, String> = LruCache::new(3);
                assert_eq!(cache.get(&"foo".to_string()), None);
                assert!(cache.is_empty());
            }

            #[test]
            fn test_get_missing_and_present_key() {
                let mut cache = LruCache::new(2);
                cache.put(1, 1);
                assert_eq!(cache.get(&0), None);
                assert_eq!(cache.get(&1), Some(&1));
            }

            #[test]
            fn test_miss_has_no_side_effect() {
                let mut cache = LruCache::new(3);
                cache.put(1, 'a');
                cache.put(2, 'b');
                let before = order(&cache);
                assert_eq!(cache.get(&7), None);
                assert_eq!(order(&cache), before);
                assert_eq!(cache.len(), 2);
            }

            #[test]
            fn test_get_mut_updates_in_place() {
                let mut cache = LruCache::new(2);
                cache.put(1, vec![1]);
                cache.put(2, vec![2]);
                cache.get_mut(&1).unwrap().push(10);
                assert_eq!(cache.peek(&1), Some(&vec![1, 10]));
                assert_eq!(order(&cache), vec![1, 2]);
            }

            #[test]
            fn test_peek_does_not_promote() {
                let mut cache = LruCache::new(3);
                cache.put(1, "one");
                cache.put(2, "two");
                cache.put(3, "three");

                assert_eq!(cache.peek(&1), Some(&"one"));
                cache.put(4, "four");
                assert!(!cache.contains(&1));
            }

            #[test]
            fn test_iter_runs_mru_to_lru() {
                let mut cache = LruCache::new(4);
                cache.extend([(1, 'a'), (2, 'b'), (3, 'c')]);
                cache.get(&1);
                assert_eq!(order(&cache), vec![1, 3, 2]);
                assert_eq!(cache.iter().len(), 3);
            }
        }

        mod eviction {
            use super::*;

            #[test]
            fn test_insertion_order_eviction() {
                let mut cache = LruCache::new(10);
                for i in 0..10 {
                    cache.put(i, i);
                }
                for i in 10..20 {
                    cache.put(i, i);
                }
                for i in 0..10 {
                    assert_eq!(cache.get(&i), None, "key {} should have been evicted", i);
                }
                for i in 10..20 {
                    assert_eq!(cache.get(&i), Some(&i));
                }
            }

            #[test]
            fn test_partial_overflow_keeps_newest_window() {
                let capacity = 5u32;
                let overflow = 3u32;
                let mut cache = LruCache::new(capacity as usize);
                for i in 0..capacity + overflow {
                    cache.put(i, i * 10);
                }
                for i in 0..overflow {
                    assert!(!cache.contains(&i));
                }
                for i in overflow..capacity + overflow {
                    assert_eq!(cache.peek(&i), Some(&(i * 10)));
                }
            }

            #[test]
            fn test_get_promotion_changes_victim() {
                let mut cache = LruCache::new(2);
                cache.put(1, "a");
                cache.put(2, "b");
                cache.get(&1);
                cache.put(3, "c");

                assert!(!cache.contains(&2));
                assert_eq!(cache.get(&1), Some(&"a"));
                assert_eq!(cache.get(&3), Some(&"c"));
            }

            #[test]
            fn test_touch_promotion_changes_victim() {
                let mut cache = LruCache::new(3);
                cache.put(1, ());
                cache.put(2, ());
                cache.put(3, ());
                assert!(cache.touch(&1));
                assert!(!cache.touch(&9));
                cache.put(4, ());
                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
            }

            #[test]
            fn test_single_eviction_per_overflow() {
                let mut cache = LruCache::new(3);
                for i in 0..3 {
                    cache.put(i, i);
                }
                cache.put(3, 3);
                assert_eq!(cache.len(), 3);
                assert_eq!(order(&cache), vec![3, 2, 1]);
            }

            #[test]
            fn test_capacity_one() {
                let mut cache = LruCache::new(1);
                cache.put(1, "a");
                cache.put(2, "b");
                assert_eq!(cache.get(&1), None);
                assert_eq!(cache.get(&2), Some(&"b"));
                cache.check_invariants().unwrap();
            }

            #[test]
            fn test_pop_and_peek_lru() {
                let mut cache = LruCache::new(4);
                cache.put(1, "one");
                cache.put(2, "two");
                cache.get(&1);

                assert_eq!(cache.peek_lru(), Some((&2, &"two")));
                assert_eq!(cache.pop_lru(), Some((2, "two")));
                assert_eq!(cache.pop_lru(), Some((1, "one")));
                assert_eq!(cache.pop_lru(), None);
            }
        }

        mod update {
            use super::*;

            #[test]
            fn test_update_in_place_does_not_evict() {
                let mut cache = LruCache::new(2);
                cache.put(1, "one");
                cache.put(2, "two");
                assert_eq!(cache.put(1, "ONE"), Some("one"));

                assert_eq!(cache.len(), 2);
                assert_eq!(cache.peek(&1), Some(&"ONE"));
                assert_eq!(cache.peek(&2), Some(&"two"));
            }

            #[test]
            fn test_update_promotes() {
                let mut cache = LruCache::new(2);
                cache.put(1, 1);
                cache.put(2, 2);
                cache.put(1, 11);
                cache.put(3, 3);

                assert!(cache.contains(&1));
                assert!(!cache.contains(&2));
                assert_eq!(cache.recency_rank(&1), Some(1));
                assert_eq!(cache.recency_rank(&3), Some(0));
            }
        }

        mod delete {
            use super::*;

            #[test]
            fn test_delete_present_and_absent() {
                let mut cache = LruCache::new(4);
                cache.put(1, "a");
                cache.put(2, "b");

                assert!(cache.delete(&1));
                assert_eq!(cache.len(), 1);
                assert_eq!(cache.get(&1), None);

                assert!(!cache.delete(&1));
                assert!(!cache.delete(&42));
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn test_remove_returns_value() {
                let mut cache = LruCache::new(4);
                cache.put(1, String::from("owned"));
                assert_eq!(cache.remove(&1), Some(String::from("owned")));
                assert_eq!(cache.remove(&1), None);
            }

            #[test]
            fn test_delete_all_then_reinsert() {
                let mut cache = LruCache::new(10);
                for i in 0..10 {
                    cache.put(i, i);
                }
                for i in 0..10 {
                    assert!(cache.delete(&i));
                }
                assert!(cache.is_empty());
                cache.check_invariants().unwrap();

                for i in 0..10 {
                    cache.put(i, i * 2);
                }
                for i in 0..10 {
                    assert_eq!(cache.get(&i), Some(&(i * 2)));
                }
                cache.check_invariants().unwrap();
            }

            #[test]
            fn test_clear_then_reuse() {
                let mut cache = LruCache::new(3);
                cache.extend((0..3).map(|i| (i, i)));
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.peek_lru(), None);
                cache.put(7, 7);
                assert_eq!(cache.get(&7), Some(&7));
            }
        }

        mod traits {
            use super::*;

            #[test]
            fn test_trait_objects_agree_with_inherent_methods() {
                let mut cache = LruCache::new(3);
                cache.put(1, 'x');
                cache.put(2, 'y');

                assert_eq!(CoreCache::len(&cache), 2);
                assert_eq!(LruCacheTrait::lru_key(&cache), Some(&1));
                assert!(LruCacheTrait::touch(&mut cache, &1));
                assert_eq!(LruCacheTrait::lru_key(&cache), Some(&2));
                assert!(CoreCache::delete(&mut cache, &2));
                assert!(!CoreCache::contains(&cache, &2));
            }

            #[test]
            fn test_debug_reports_len_and_capacity() {
                let mut cache = LruCache::new(5);
                cache.put(1, 1);
                let dbg = format!("{:?}", cache);
                assert!(dbg.contains("len: 1"));
                assert!(dbg.contains("capacity: 5"));
            }
        }
    }

    // ==============================================
    // PROPERTY TESTS MODULE
    // ==============================================
    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::VecDeque;

        #[derive(Debug, Clone)]
        enum Op {
            Put(u8, u32),
            Get(u8),
            Peek(u8),
            Delete(u8),
            Touch(u8),
            PopLru,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0u8..32, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
                3 => (0u8..32).prop_map(Op::Get),
                1 => (0u8..32).prop_map(Op::Peek),
                1 => (0u8..32).prop_map(Op::Delete),
                1 => (0u8..32).prop_map(Op::Touch),
                1 => Just(Op::PopLru),
            ]
        }

        /// Reference model: front = MRU.
        fn model_touch(model: &mut VecDeque<(u8, u32)>, key: u8) -> Option<u32> {
            let pos = model.iter().position(|(k, _)| *k == key)?;
            let entry = model.remove(pos)?;
            model.push_front(entry);
            Some(entry.1)
        }

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_model(
                capacity in 1usize..12,
                ops in prop::collection::vec(op_strategy(), 0..200)
            ) {
                let mut cache: LruCache<u8, u32> = LruCache::new(capacity);
                let mut model: VecDeque<(u8, u32)> = VecDeque::new();

                for op in ops {
                    match op {
                        Op::Put(k, v) => {
                            let expected = match model_touch(&mut model, k) {
                                Some(old) => {
                                    model[0].1 = v;
                                    Some(old)
                                },
                                None => {
                                    model.push_front((k, v));
                                    if model.len() > capacity {
                                        model.pop_back();
                                    }
                                    None
                                },
                            };
                            prop_assert_eq!(cache.put(k, v), expected);
                        },
                        Op::Get(k) => {
                            let expected = model_touch(&mut model, k);
                            prop_assert_eq!(cache.get(&k).copied(), expected);
                        },
                        Op::Peek(k) => {
                            let expected = model.iter().find(|(mk, _)| *mk == k).map(|(_, v)| *v);
                            prop_assert_eq!(cache.peek(&k).copied(), expected);
                        },
                        Op::Delete(k) => {
                            let pos = model.iter().position(|(mk, _)| *mk == k);
                            if let Some(pos) = pos {
                                model.remove(pos);
                            }
                            prop_assert_eq!(cache.delete(&k), pos.is_some());
                        },
                        Op::Touch(k) => {
                            let expected = model_touch(&mut model, k).is_some();
                            prop_assert_eq!(cache.touch(&k), expected);
                        },
                        Op::PopLru => {
                            prop_assert_eq!(cache.pop_lru(), model.pop_back());
                        },
                    }

                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                    let actual: Vec<(u8, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                    let expected: Vec<(u8, u32)> = model.iter().copied().collect();
                    prop_assert_eq!(actual, expected);
                }
            }

            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_distinct_puts_keep_last_window(
                capacity in 1usize..40,
                extra in 0usize..40
            ) {
                let total = capacity + extra;
                let mut cache = LruCache::new(capacity);
                for i in 0..total {
                    cache.put(i, i);
                    prop_assert!(cache.len() <= capacity);
                }
                for i in 0..extra {
                    prop_assert!(!cache.contains(&i));
                }
                for i in extra..total {
                    prop_assert_eq!(cache.get(&i), Some(&i));
                }
            }
        }
    }
}
