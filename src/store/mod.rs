//! Value ownership for the caches.
//!
//! The owned-value cache keeps `V` inline in its nodes. The weak-value cache
//! stores the weak half of a [`SharedPointer`] instead.

pub mod shared;

pub use shared::SharedPointer;
