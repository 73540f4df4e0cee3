//! Cache policies.
//!
//! | Policy         | File          | Values                    | Min capacity |
//! |----------------|---------------|---------------------------|--------------|
//! | LRU            | `lru.rs`      | owned `V`                 | 1            |
//! | Weak-value LRU | `weak_lru.rs` | `Weak` half of `Rc`/`Arc` | 2            |
//!
//! Both wrap the crate-private `LruCore`, which owns the key index and the
//! recency list.

#[cfg(any(feature = "policy-lru", feature = "policy-weak-lru"))]
pub(crate) mod lru_core;

#[cfg(feature = "policy-lru")]
pub mod lru;

#[cfg(feature = "policy-weak-lru")]
pub mod weak_lru;
