//! Error types for lrukit.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned by fallible constructors when the requested
//!   capacity is below the cache's minimum.
//! - [`InvariantError`]: Returned by `check_invariants` diagnostics when the
//!   key index and the recency list disagree. Normal cache operations never
//!   produce it.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u64, String>, ConfigError> = LruCache::try_new(16);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<u64, String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LruCache::try_new`](crate::policy::lru::LruCache::try_new),
/// [`WeakLruCache::try_new`](crate::policy::weak_lru::WeakLruCache::try_new)
/// and the builder's `try_build_*` methods.
///
/// # Example
///
/// ```
/// use lrukit::policy::weak_lru::RcWeakLruCache;
///
/// let err = RcWeakLruCache::<u64, u64>::try_new(1).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Wraps an arbitrary description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Builds the error for a capacity below `minimum`.
    pub(crate) fn capacity_below(minimum: usize, got: usize) -> Self {
        Self(format!("cache capacity must be at least {minimum}, got {got}"))
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// A disagreement between a cache's key index and its recency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
