//! Storage capability traits and the impls shipped with the crate.
//!
//! A [`SortedBuffer`](crate::sorted::SortedBuffer) is generic over the store
//! it owns. Two disjoint storage shapes are supported without a common base
//! type:
//!
//! - **Fixed-capacity indexable storage** ([`FixedStore`]): a block of
//!   addressable slots that can be read and overwritten in place but never
//!   grown. Shipped impls: `[T; N]` and `Box<[T]>`.
//! - **Growable container storage** ([`GrowableStore`]): everything a fixed
//!   store offers plus append, bulk append, reservation, truncation, and
//!   native range removal. Shipped impls: `Vec<T>` and, behind the `smallvec`
//!   feature, `SmallVec<[T; N]>`.
//!
//! Which capability set a store exposes is decided by its trait impls, once,
//! at the type level. The buffer's algorithms are monomorphized against those
//! impls; no capability is probed at run time on a per-call basis.
//!
//! # Writing a custom store
//!
//! Implement [`FixedStore`] and leave the provided capability hooks alone for
//! a store that cannot grow. For a growable store, additionally implement
//! [`GrowableStore`] and override the hooks to delegate to it, as the `Vec`
//! impl in this module does.

use std::ops::Range;

mod fixed;
mod growable;

/// Fixed-capacity indexable storage.
///
/// The contract the sorted buffer relies on:
///
/// - [`capacity`](Self::capacity) reports the number of addressable slots the
///   store currently materializes. For a fixed store this never changes; for
///   a growable store it is the current length, and growth adds slots.
/// - [`as_slice`](Self::as_slice) / [`as_mut_slice`](Self::as_mut_slice)
///   expose exactly those `capacity()` slots.
///
/// The remaining methods are capability hooks with conservative defaults
/// (cannot grow, nothing to reserve, no native shrink or removal). Growable
/// stores override them; see [`GrowableStore`].
pub trait FixedStore {
    /// The element type held in each slot.
    type Item;

    /// Whether this store can grow beyond its current capacity.
    ///
    /// Used to pick insertion strategy at compile time, e.g. failing a bulk
    /// insertion up front when a non-growable store cannot possibly hold it.
    const GROWABLE: bool = false;

    /// Number of addressable slots currently materialized.
    fn capacity(&self) -> usize;

    /// All materialized slots, dead ones included.
    fn as_slice(&self) -> &[Self::Item];

    /// Mutable access to all materialized slots.
    fn as_mut_slice(&mut self) -> &mut [Self::Item];

    /// Attempts to add one slot holding `item` at the end of the store.
    ///
    /// A store that cannot grow hands `item` back unchanged.
    fn grow_one(&mut self, item: Self::Item) -> Result<(), Self::Item> {
        Err(item)
    }

    /// Adds slots for as many of `items` as the store accepts, in order.
    ///
    /// Returns the number of items actually taken. The default stops at the
    /// first item [`grow_one`](Self::grow_one) rejects.
    fn grow_from_iter<I>(&mut self, items: I) -> usize
    where
        I: Iterator<Item = Self::Item>,
        Self: Sized,
    {
        let mut taken = 0;
        for item in items {
            if self.grow_one(item).is_err() {
                break;
            }
            taken += 1;
        }
        taken
    }

    /// Hint that `additional` more slots are about to be requested.
    fn reserve_hint(&mut self, _additional: usize) {}

    /// Attempts to discard every slot at index `keep` and beyond.
    ///
    /// Returns `false` when the store has no native truncation, in which case
    /// the dead slots simply stay materialized.
    fn try_shrink(&mut self, _keep: usize) -> bool {
        false
    }

    /// Attempts to natively remove the slots in `span`, shifting later slots
    /// down. Returns `false` when the store has no native range removal.
    fn try_remove_span(&mut self, _span: Range<usize>) -> bool {
        false
    }
}

/// Growable container storage: append, bulk append, reservation, truncation,
/// and native range removal on top of [`FixedStore`].
///
/// Impls of this trait are expected to also override the capability hooks of
/// [`FixedStore`] to delegate here, so that buffer algorithms written against
/// the base trait pick up the extra capabilities.
pub trait GrowableStore: FixedStore {
    /// Appends one element, growing the store by one slot.
    fn append(&mut self, item: Self::Item);

    /// Appends every element of `items`, growing the store accordingly.
    fn append_many<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Self::Item>;

    /// Reserves room for at least `additional` more slots.
    fn reserve(&mut self, additional: usize);

    /// Discards every slot at index `keep` and beyond.
    fn truncate(&mut self, keep: usize);

    /// Removes the slots in `span`, shifting later slots down.
    fn remove_span(&mut self, span: Range<usize>);
}
