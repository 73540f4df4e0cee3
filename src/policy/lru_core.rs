//! Index + recency list shared by both LRU caches.
//!
//! `LruCore<K, T>` knows nothing about value ownership: the owned-value cache
//! instantiates it with `T = V`, the weak-value cache with `T = P::Weak`. All
//! ordering and eviction decisions are made here.
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          list: RecencyList<Entry<K, T>>
//!   ┌──────┬──────┐
//!   │ k_a  │ id_1 │ ─────────────►  head ─► [id_1: k_a] ◄─► [id_2: k_b] ◄─ tail
//!   │ k_b  │ id_2 │ ───────────────────────────────────────────┘
//!   └──────┴──────┘
//! ```
//!
//! Each list node stores its key, so evicting the tail can drop the matching
//! index entry without a reverse map.

// Each cache uses a different subset of the core.
#![cfg_attr(
    not(all(feature = "policy-lru", feature = "policy-weak-lru")),
    allow(dead_code)
)]

use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::{RecencyList, SlotId};
use crate::error::InvariantError;
use crate::traits::CacheConfig;

#[derive(Debug)]
pub(crate) struct Entry<K, T> {
    pub(crate) key: K,
    pub(crate) value: T,
}

/// Result of [`LruCore::put`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PutOutcome<K, T> {
    /// The key existed; its previous value is returned.
    Updated(T),
    /// The key was new. `evicted` holds the entry pushed out by the insert.
    Inserted { evicted: Option<(K, T)> },
}

pub(crate) struct LruCore<K, T> {
    index: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, T>>,
    capacity: usize,
}

impl<K, T> LruCore<K, T>
where
    K: Eq + Hash + Clone,
{
    /// Builds an empty core. Capacity validation is the caller's job.
    pub(crate) fn with_config(config: &CacheConfig) -> Self {
        let reserve = config.initial_reservation();
        Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            list: RecencyList::with_capacity(reserve),
            capacity: config.capacity,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up `key` and moves it to the head of the recency list.
    #[inline]
    pub(crate) fn get(&mut self, key: &K) -> Option<&mut T> {
        self.promote(key).map(|entry| &mut entry.value)
    }

    /// Looks up `key` without touching recency order.
    #[inline]
    pub(crate) fn peek(&self, key: &K) -> Option<&T> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Inserts or updates `key`.
    ///
    /// An update replaces the value in place and promotes the node. An insert
    /// links a new node at the head and, if that pushes the index past
    /// capacity, evicts exactly one node from the tail.
    pub(crate) fn put(&mut self, key: K, value: T) -> PutOutcome<K, T> {
        if let Some(entry) = self.promote(&key) {
            return PutOutcome::Updated(mem::replace(&mut entry.value, value));
        }

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        let evicted = if self.index.len() > self.capacity {
            let evicted = self.pop_lru();
            trace!(
                capacity = self.capacity,
                len = self.index.len(),
                "evicted least-recently-used entry"
            );
            evicted
        } else {
            None
        };
        PutOutcome::Inserted { evicted }
    }

    /// Moves `key` to the head without reading its value.
    #[inline]
    pub(crate) fn touch(&mut self, key: &K) -> bool {
        self.promote(key).is_some()
    }

    /// Unlinks `key` from both the index and the list.
    pub(crate) fn remove(&mut self, key: &K) -> Option<T> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|entry| entry.value)
    }

    /// Unlinks the tail node.
    pub(crate) fn pop_lru(&mut self) -> Option<(K, T)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    pub(crate) fn peek_lru(&self) -> Option<(&K, &T)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    pub(crate) fn lru_key(&self) -> Option<&K> {
        self.list.back().map(|entry| &entry.key)
    }

    /// O(n) walk from the head; `0` is most-recently-used.
    pub(crate) fn recency_rank(&self, key: &K) -> Option<usize> {
        let target = *self.index.get(key)?;
        self.list.iter_entries().position(|(id, _)| id == target)
    }

    /// Entries from most- to least-recently-used.
    pub(crate) fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &T)> {
        self.list.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Removes every entry for which `keep` returns `false`, preserving the
    /// relative order of the survivors. Returns the number removed.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&K, &T) -> bool) -> usize {
        let doomed: Vec<SlotId> = self
            .list
            .iter_entries()
            .filter(|(_, entry)| !keep(&entry.key, &entry.value))
            .map(|(id, _)| id)
            .collect();

        let mut removed = 0;
        for id in doomed {
            if let Some(entry) = self.list.remove(id) {
                self.index.remove(&entry.key);
                removed += 1;
            }
        }
        removed
    }

    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }

    /// Cross-checks the index against the list.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "index holds {} keys, capacity is {}",
                self.index.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but recency list holds {} nodes",
                self.index.len(),
                self.list.len()
            )));
        }
        for (id, entry) in self.list.iter_entries() {
            match self.index.get(&entry.key) {
                Some(&indexed) if indexed == id => {},
                other => {
                    return Err(InvariantError::new(format!(
                        "node {:?} is indexed as {:?}",
                        id, other
                    )));
                },
            }
        }
        Ok(())
    }

    #[inline]
    fn promote(&mut self, key: &K) -> Option<&mut Entry<K, T>> {
        let id = *self.index.get(key)?;
        self.list.move_to_front(id);
        self.list.get_mut(id)
    }
}
