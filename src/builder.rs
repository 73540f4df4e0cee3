//! Cache builder.
//!
//! Collects construction parameters once and hands out either cache flavour.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use lrukit::builder::CacheBuilder;
//!
//! let builder = CacheBuilder::new(64).prealloc(false);
//!
//! let mut owned = builder.try_build_lru::<u64, String>()?;
//! owned.put(1, "hello".to_string());
//! assert_eq!(owned.get(&1), Some(&"hello".to_string()));
//!
//! let mut weak = builder.try_build_weak::<u64, Arc<String>>()?;
//! let value = Arc::new("shared".to_string());
//! weak.put(1, &value);
//! assert!(weak.get(&1).is_some_and(|hit| hit.is_live()));
//! # Ok::<(), lrukit::error::ConfigError>(())
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
#[cfg(feature = "policy-lru")]
use crate::policy::lru::LruCache;
#[cfg(feature = "policy-weak-lru")]
use crate::policy::weak_lru::WeakLruCache;
#[cfg(feature = "policy-weak-lru")]
use crate::store::SharedPointer;
use crate::traits::CacheConfig;

/// Builder for [`LruCache`] and [`WeakLruCache`].
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Starts a builder for a cache of `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig::with_capacity(capacity),
        }
    }

    /// Starts a builder from an existing config.
    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Whether to reserve the index and node arena up front. Defaults to `true`.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.config.prealloc_memory = prealloc;
        self
    }

    /// Returns the accumulated config.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Builds an owned-value cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    #[cfg(feature = "policy-lru")]
    pub fn try_build_lru<K, V>(&self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::try_with_config(self.config.clone())
    }

    /// Builds an owned-value cache.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero.
    #[cfg(feature = "policy-lru")]
    pub fn build_lru<K, V>(&self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build_lru() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds a weak-value cache over pointer type `P`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is below 2.
    #[cfg(feature = "policy-weak-lru")]
    pub fn try_build_weak<K, P>(&self) -> Result<WeakLruCache<K, P>, ConfigError>
    where
        K: Eq + Hash + Clone,
        P: SharedPointer,
    {
        WeakLruCache::try_with_config(self.config.clone())
    }

    /// Builds a weak-value cache over pointer type `P`.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is below 2.
    #[cfg(feature = "policy-weak-lru")]
    pub fn build_weak<K, P>(&self) -> WeakLruCache<K, P>
    where
        K: Eq + Hash + Clone,
        P: SharedPointer,
    {
        match self.try_build_weak() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::from_config(CacheConfig::default())
    }
}
