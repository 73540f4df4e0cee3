pub use crate::builder::CacheBuilder;
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "policy-lru")]
pub use crate::policy::lru::LruCache;
#[cfg(feature = "policy-weak-lru")]
pub use crate::policy::weak_lru::{ArcWeakLruCache, Lookup, RcWeakLruCache, WeakLruCache};
pub use crate::store::SharedPointer;
pub use crate::traits::{CacheConfig, CoreCache, LruCacheTrait};
