//! Shared pointers with a weak counterpart.
//!
//! [`WeakLruCache`](crate::policy::weak_lru::WeakLruCache) never owns the
//! values it indexes. It stores the weak half of a reference-counted pointer
//! and upgrades it on lookup; the strong half stays with the caller, who alone
//! decides when the value is dropped.
//!
//! ```text
//!   caller                         cache node
//!   ┌─────────────┐  downgrade    ┌──────────────┐
//!   │  Arc<T>     │──────────────►│  Weak<T>     │
//!   │ (strong: 1) │               │ (weak: 1)    │
//!   └─────────────┘               └──────────────┘
//!          │ drop                        │ upgrade
//!          ▼                             ▼
//!     T is freed                      None → Lookup::Expired
//! ```
//!
//! `Rc` and `Arc` both implement [`SharedPointer`]. Dropping the last strong
//! pointer frees the value immediately, so expiry is observable on the very
//! next lookup.

use std::rc::{self, Rc};
use std::sync::{self, Arc};

/// A strong, cloneable pointer that can hand out non-owning observations.
pub trait SharedPointer: Clone {
    /// Non-owning observation of the pointee.
    type Weak: Clone;

    /// Creates a weak observation without extending the pointee's lifetime.
    fn downgrade(this: &Self) -> Self::Weak;

    /// Resolves `weak` back to a strong pointer if the pointee is still alive.
    fn upgrade(weak: &Self::Weak) -> Option<Self>;

    /// Returns `true` if the pointee behind `weak` has been dropped.
    fn is_expired(weak: &Self::Weak) -> bool;

    /// Returns `true` if both pointers address the same allocation.
    fn ptr_eq(this: &Self, other: &Self) -> bool;
}

impl<T: ?Sized> SharedPointer for Rc<T> {
    type Weak = rc::Weak<T>;

    #[inline]
    fn downgrade(this: &Self) -> Self::Weak {
        Rc::downgrade(this)
    }

    #[inline]
    fn upgrade(weak: &Self::Weak) -> Option<Self> {
        weak.upgrade()
    }

    #[inline]
    fn is_expired(weak: &Self::Weak) -> bool {
        weak.strong_count() == 0
    }

    #[inline]
    fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(this, other)
    }
}

impl<T: ?Sized> SharedPointer for Arc<T> {
    type Weak = sync::Weak<T>;

    #[inline]
    fn downgrade(this: &Self) -> Self::Weak {
        Arc::downgrade(this)
    }

    #[inline]
    fn upgrade(weak: &Self::Weak) -> Option<Self> {
        weak.upgrade()
    }

    #[inline]
    fn is_expired(weak: &Self::Weak) -> bool {
        weak.strong_count() == 0
    }

    #[inline]
    fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(this, other)
    }
}
