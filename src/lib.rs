//! lrukit: fixed-capacity LRU caches with owned or weakly-referenced values.
//!
//! - [`policy::lru::LruCache`] owns its values.
//! - [`policy::weak_lru::WeakLruCache`] stores only the `Weak` half of an
//!   `Rc`/`Arc`, so cached values live exactly as long as their owners keep
//!   them.
//!
//! Both share one arena-backed recency list ([`ds::RecencyList`]) and an
//! `FxHashMap` key index, giving O(1) lookup, promotion, insertion and
//! eviction. Neither synchronizes internally.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod store;
pub mod traits;
