//! # sortedbuf
//!
//! An adapter that imposes and maintains a total order over the contents of
//! an underlying indexable store, without re-sorting after each mutation.
//!
//! ## Overview
//!
//! [`SortedBuffer`] wraps a caller-supplied store (a plain array, a boxed
//! slice, a `Vec`, or a `SmallVec`), takes ownership of it, and keeps a
//! leading prefix of it sorted under a comparator fixed at construction:
//!
//! - **Sorted insertion**: single elements are rotated into place after a
//!   binary search; bulk insertions are appended and merged in with one
//!   in-place merge pass.
//! - **Sorted removal**: by position range out of the buffer's own query
//!   surface, or from the back.
//! - **Range queries**: `lower_bound`, `upper_bound`, and `equal_range`
//!   bracket comparator-equivalent elements in O(log n), returning read-only
//!   views that borrow the storage.
//!
//! Fixed-capacity and growable stores are handled through two capability
//! traits ([`storage::FixedStore`], [`storage::GrowableStore`]); which
//! insertion and removal strategy applies is decided at the type level, not
//! per call.
//!
//! This is not an ordered map or set: there is no key/value separation, no
//! deduplication, and no balanced-tree bound. It is also not thread-safe and
//! persists nothing.
//!
//! ## Example
//!
//! ```rust
//! use sortedbuf::{SortedBuffer, ascending};
//!
//! let mut buffer = SortedBuffer::acquire(vec![4, 1, 3, 2, 16, 9, 10, 14, 8, 7], ascending);
//! assert_eq!(buffer.front(), Ok(&1));
//! assert_eq!(buffer.back(), Ok(&16));
//!
//! buffer.insert_many([6, 5]).unwrap();
//! let small = buffer.lower_bound(&7).unwrap();
//! assert_eq!(small.as_slice(), &[1, 2, 3, 4, 5, 6]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use sortedbuf::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::sorted::{SharedSortedBuffer, SortedBuffer, SortedView, ascending, descending};
    pub use crate::storage::{FixedStore, GrowableStore};
}

pub mod error;
pub mod sorted;
pub mod storage;

pub use error::Error;
pub use sorted::{SharedSortedBuffer, SortedBuffer, SortedView, ascending, descending};
