//! The sorted buffer adapter.
//!
//! This module provides [`SortedBuffer`], an adapter that owns an indexable
//! store and keeps a leading prefix of it, the *live prefix*, sorted under
//! a comparator fixed at construction. Mutation goes through the buffer's
//! insertion and removal operations, which restore sortedness incrementally
//! instead of re-sorting; queries run binary searches over the live prefix.
//!
//! # Overview
//!
//! The buffer works over two storage shapes (see [`crate::storage`]):
//! fixed-capacity stores such as `[T; N]` and `Box<[T]>`, where insertion
//! beyond capacity fails, and growable stores such as `Vec<T>`, which grow on
//! demand. Slots past the live prefix are dead data: they are kept
//! materialized for reuse but never exposed through read APIs.
//!
//! # Time Complexity
//!
//! | Operation      | Cost                                    |
//! |----------------|-----------------------------------------|
//! | `acquire`      | O(n log n) sort over the initial prefix |
//! | `assume`       | O(1)                                    |
//! | `insert`       | O(log n) search + O(n) rotation         |
//! | `insert_many`  | O(m log m) sort + in-place merge        |
//! | `pop_back`     | O(1)                                    |
//! | `remove_range` | O(n) shift or native removal            |
//! | `lower_bound` / `upper_bound` / `equal_range` | O(log n) |
//! | `front` / `back` / `get` | O(1)                          |
//!
//! # Examples
//!
//! ```rust
//! use sortedbuf::{SortedBuffer, ascending};
//!
//! let mut buffer = SortedBuffer::acquire(vec![4, 1, 3, 2], ascending);
//! assert_eq!(buffer.front(), Ok(&1));
//! assert_eq!(buffer.back(), Ok(&4));
//!
//! buffer.insert(3).unwrap();
//! assert_eq!(buffer.equal_range(&3).unwrap().len(), 2);
//!
//! let store = buffer.release().unwrap();
//! assert_eq!(store, vec![1, 2, 3, 3, 4]);
//! ```
//!
//! # Aliasing rules
//!
//! Views returned by [`view`](SortedBuffer::view) and the bound queries
//! borrow the buffer's storage; the borrow checker rejects any mutating call
//! on the buffer while such a view is alive. Sharing one logical buffer
//! between several handles goes through
//! [`SharedSortedBuffer`](shared::SharedSortedBuffer) instead; the buffer
//! itself is deliberately not `Clone`, so every deep copy is an explicit
//! [`duplicate`](SortedBuffer::duplicate).

use std::cmp::Ordering;
use std::ops::{Index, Range};

use crate::error::Error;
use crate::storage::FixedStore;

mod merge;
pub mod shared;
mod view;

pub use shared::SharedSortedBuffer;
pub use view::SortedView;

/// Strict ascending order for `Ord` element types.
///
/// The canonical comparator: `ascending(a, b)` is true when `a` sorts before
/// `b`. Largest-first behavior is obtained by supplying [`descending`]
/// instead; the buffer has no special heap mode.
#[inline]
pub fn ascending<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

/// Strict descending order for `Ord` element types.
#[inline]
pub fn descending<T: Ord>(a: &T, b: &T) -> bool {
    a > b
}

const SORTED_INVARIANT_PANIC_MESSAGE: &str =
    "sortedness invariant violated: the live prefix is not ordered under the \
     configured comparator (was `assume` handed unsorted data, or a released \
     store mutated before re-attachment?)";

/// Maps a strict-order predicate onto a three-way comparison for sorting.
#[inline]
fn order_of<T, F>(less: &F, a: &T, b: &T) -> Ordering
where
    F: Fn(&T, &T) -> bool,
{
    if less(a, b) {
        Ordering::Less
    } else if less(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Whether `slice` is ordered (ascending, equals allowed) under `less`.
#[inline]
fn ordered_by<T, F>(slice: &[T], less: &F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    slice.is_sorted_by(|a, b| !less(b, a))
}

/// Ownership state of the buffer.
///
/// The buffer is either fully detached or fully attached; no
/// partially-initialized state is observable across calls.
#[derive(Clone)]
enum Inner<S> {
    Detached,
    Attached { store: S, live: usize },
}

/// An adapter that keeps a prefix of an owned store sorted under a fixed
/// comparator.
///
/// `S` is the storage type (see [`FixedStore`](crate::storage::FixedStore)
/// and [`GrowableStore`](crate::storage::GrowableStore)); `F` is the
/// comparator, a strict-order predicate `less(a, b)` that is supplied once at
/// construction and never changes for the buffer's lifetime.
///
/// # Examples
///
/// ```rust
/// use sortedbuf::{SortedBuffer, descending};
///
/// let mut buffer = SortedBuffer::acquire(vec![4, 1, 3, 2, 16, 9, 10, 14, 8, 7], descending);
/// assert_eq!(buffer.front(), Ok(&16));
///
/// // Largest-first extraction is just a descending comparator.
/// assert_eq!(buffer.take_back(), Ok(1));
/// assert_eq!(buffer.take_back(), Ok(2));
/// ```
pub struct SortedBuffer<S: FixedStore, F = fn(&<S as FixedStore>::Item, &<S as FixedStore>::Item) -> bool> {
    inner: Inner<S>,
    comparator: F,
}

impl<S, F> SortedBuffer<S, F>
where
    S: FixedStore,
    F: Fn(&S::Item, &S::Item) -> bool,
{
    /// Creates a detached buffer holding only a comparator.
    ///
    /// Every non-lifecycle operation on a detached buffer fails with
    /// [`Error::Detached`], except [`len`](Self::len),
    /// [`is_empty`](Self::is_empty), and [`capacity`](Self::capacity), which
    /// report `0`/`true`/`0`.
    #[must_use]
    pub const fn detached(comparator: F) -> Self {
        Self {
            inner: Inner::Detached,
            comparator,
        }
    }

    /// Takes ownership of `store` and sorts all of it under `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedbuf::{SortedBuffer, ascending};
    ///
    /// let buffer = SortedBuffer::acquire([4, 1, 3, 2], ascending);
    /// assert_eq!(buffer.view().unwrap().as_slice(), &[1, 2, 3, 4]);
    /// ```
    #[must_use]
    pub fn acquire(store: S, comparator: F) -> Self {
        Self::acquire_prefix(store, usize::MAX, comparator)
    }

    /// Takes ownership of `store` and sorts its first
    /// `min(initial, capacity)` slots; the rest become dead slots available
    /// for insertion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedbuf::{SortedBuffer, ascending};
    ///
    /// let mut buffer = SortedBuffer::acquire_prefix([9, 7, 8, 0, 0], 3, ascending);
    /// assert_eq!(buffer.len(), 3);
    /// buffer.insert(1).unwrap();
    /// assert_eq!(buffer.view().unwrap().as_slice(), &[1, 7, 8, 9]);
    /// ```
    #[must_use]
    pub fn acquire_prefix(mut store: S, initial: usize, comparator: F) -> Self {
        let live = initial.min(store.capacity());
        if live >= 2 {
            store.as_mut_slice()[..live].sort_unstable_by(|a, b| order_of(&comparator, a, b));
        }
        Self {
            inner: Inner::Attached { store, live },
            comparator,
        }
    }

    /// Takes ownership of `store`, trusting the caller that all of it is
    /// already sorted under `comparator`.
    ///
    /// Skipping the sort pass is the whole point; handing over unsorted data
    /// silently corrupts every subsequent query. The precondition is checked
    /// only under `debug_assertions`.
    #[must_use]
    pub fn assume(store: S, comparator: F) -> Self {
        Self::assume_prefix(store, usize::MAX, comparator)
    }

    /// [`assume`](Self::assume) limited to the first
    /// `min(initial, capacity)` slots.
    #[must_use]
    pub fn assume_prefix(store: S, initial: usize, comparator: F) -> Self {
        let live = initial.min(store.capacity());
        debug_assert!(
            ordered_by(&store.as_slice()[..live], &comparator),
            "{SORTED_INVARIANT_PANIC_MESSAGE}"
        );
        Self {
            inner: Inner::Attached { store, live },
            comparator,
        }
    }

    /// Attaches `store` to a buffer, sorting all of it under the buffer's
    /// comparator. Any previously owned store is dropped.
    pub fn attach(&mut self, mut store: S) {
        let live = store.capacity();
        if live >= 2 {
            let less = &self.comparator;
            store.as_mut_slice().sort_unstable_by(|a, b| order_of(less, a, b));
        }
        self.inner = Inner::Attached { store, live };
    }

    /// Attaches `store` without sorting, trusting the caller that it is
    /// already sorted. This is the fast path for restoring a store obtained from
    /// [`release`](Self::release).
    pub fn attach_sorted(&mut self, store: S) {
        let live = store.capacity();
        debug_assert!(
            ordered_by(&store.as_slice()[..live], &self.comparator),
            "{SORTED_INVARIANT_PANIC_MESSAGE}"
        );
        self.inner = Inner::Attached { store, live };
    }

    /// Hands the store back to the caller and detaches the buffer.
    ///
    /// Stores with native truncation come back trimmed to the live prefix;
    /// fixed stores come back whole, with slots past the former
    /// [`len`](Self::len) holding unspecified dead data. Returns `None` when
    /// the buffer was already detached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedbuf::{SortedBuffer, ascending};
    ///
    /// let mut buffer = SortedBuffer::acquire(vec![3, 1, 2], ascending);
    /// buffer.pop_back().unwrap();
    /// assert_eq!(buffer.release(), Some(vec![1, 2]));
    /// assert_eq!(buffer.release(), None);
    /// ```
    pub fn release(&mut self) -> Option<S> {
        match std::mem::replace(&mut self.inner, Inner::Detached) {
            Inner::Detached => None,
            Inner::Attached { mut store, live } => {
                store.try_shrink(live);
                Some(store)
            }
        }
    }

    /// Drops the owned store, if any, and detaches the buffer.
    pub fn clear(&mut self) {
        self.inner = Inner::Detached;
    }

    /// Returns an independent buffer owning a deep copy of the store, with
    /// the same live length. A detached buffer duplicates to a detached
    /// buffer.
    ///
    /// This is the only way to copy a buffer; plain cloning is intentionally
    /// not provided, and shared handles live in
    /// [`SharedSortedBuffer`](shared::SharedSortedBuffer).
    #[must_use]
    pub fn duplicate(&self) -> Self
    where
        S: Clone,
        F: Clone,
    {
        Self {
            inner: self.inner.clone(),
            comparator: self.comparator.clone(),
        }
    }

    /// Whether the buffer currently owns no store.
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        matches!(self.inner, Inner::Detached)
    }

    /// Number of live elements. `0` for a detached buffer.
    #[must_use]
    pub const fn len(&self) -> usize {
        match &self.inner {
            Inner::Detached => 0,
            Inner::Attached { live, .. } => *live,
        }
    }

    /// Whether the live prefix is empty. `true` for a detached buffer.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of addressable slots in the owned store. `0` for a detached
    /// buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        match &self.inner {
            Inner::Detached => 0,
            Inner::Attached { store, .. } => store.capacity(),
        }
    }

    /// Inserts `value` at its sorted position.
    ///
    /// A dead slot is reused when one exists; otherwise the store is asked to
    /// grow by one slot, which fails with [`Error::CapacityExceeded`] on
    /// fixed-capacity storage. The new element is then rotated into place
    /// against the sorted prefix: one binary search plus one rotation, not a
    /// re-sort. Elements comparing equal to existing ones land after them.
    ///
    /// # Errors
    ///
    /// [`Error::Detached`] without a store, [`Error::CapacityExceeded`] when
    /// the store is full and cannot grow (the live length is left unchanged).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedbuf::{SortedBuffer, ascending};
    ///
    /// let mut buffer = SortedBuffer::acquire(vec![1, 5, 9], ascending);
    /// buffer.insert(7).unwrap();
    /// assert_eq!(buffer.view().unwrap().as_slice(), &[1, 5, 7, 9]);
    /// ```
    pub fn insert(&mut self, value: S::Item) -> Result<(), Error> {
        let Inner::Attached { store, live } = &mut self.inner else {
            return Err(Error::Detached);
        };
        if *live < store.capacity() {
            store.as_mut_slice()[*live] = value;
        } else if store.grow_one(value).is_err() {
            return Err(Error::CapacityExceeded {
                needed: 1,
                available: 0,
            });
        }
        *live += 1;

        let less = &self.comparator;
        let prefix = &mut store.as_mut_slice()[..*live];
        let (sorted, trailing) = prefix.split_at(*live - 1);
        let position = sorted.partition_point(|element| !less(&trailing[0], element));
        prefix[position..].rotate_right(1);

        debug_assert!(
            ordered_by(prefix, less),
            "{SORTED_INVARIANT_PANIC_MESSAGE}"
        );
        Ok(())
    }

    /// Inserts every element of `values`, restoring sortedness once at the
    /// end.
    ///
    /// The incoming elements are appended raw (dead slots first, then store
    /// growth, with a reservation hint for the expected count), after which
    /// the appended block is sorted and merged in place against the sorted
    /// prefix. For runs that actually interleave this costs one merge pass,
    /// cheaper than re-sorting the whole prefix.
    ///
    /// Returns the number of elements inserted.
    ///
    /// # Errors
    ///
    /// On a non-growable store the call fails up front with
    /// [`Error::CapacityExceeded`], committing nothing, when the iterator
    /// guarantees more elements than there are free slots. If capacity runs
    /// out mid-batch anyway (imprecise size hint), the elements already
    /// appended are merged so the sorted invariant holds, and the error is
    /// returned; [`len`](Self::len) then counts exactly the committed
    /// elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedbuf::{SortedBuffer, ascending};
    ///
    /// let mut buffer = SortedBuffer::acquire(vec![2, 4, 6], ascending);
    /// assert_eq!(buffer.insert_many([5, 1, 3]), Ok(3));
    /// assert_eq!(buffer.view().unwrap().as_slice(), &[1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn insert_many<I>(&mut self, values: I) -> Result<usize, Error>
    where
        I: IntoIterator<Item = S::Item>,
    {
        let Inner::Attached { store, live } = &mut self.inner else {
            return Err(Error::Detached);
        };
        let items = values.into_iter();
        let free = store.capacity() - *live;
        let guaranteed = items.size_hint().0;
        if !S::GROWABLE && guaranteed > free {
            return Err(Error::CapacityExceeded {
                needed: guaranteed,
                available: free,
            });
        }
        store.reserve_hint(guaranteed.saturating_sub(free));

        let sorted_end = *live;
        let mut appended = 0usize;
        let mut shortfall = false;
        if S::GROWABLE && sorted_end == store.capacity() {
            // No dead slots to fill: hand the whole iterator to the store's
            // bulk growth, which takes everything for a growable store.
            appended = store.grow_from_iter(items);
        } else {
            // Dead slots first, then ask the store to grow per element.
            for item in items {
                let slot = sorted_end + appended;
                if slot < store.capacity() {
                    store.as_mut_slice()[slot] = item;
                } else if store.grow_one(item).is_err() {
                    shortfall = true;
                    break;
                }
                appended += 1;
            }
        }

        let total = sorted_end + appended;
        if appended > 0 {
            let less = &self.comparator;
            let prefix = &mut store.as_mut_slice()[..total];
            prefix[sorted_end..].sort_unstable_by(|a, b| order_of(less, a, b));
            merge::merge_adjacent(prefix, sorted_end, less);
            debug_assert!(
                ordered_by(prefix, less),
                "{SORTED_INVARIANT_PANIC_MESSAGE}"
            );
        }
        *live = total;

        if shortfall {
            return Err(Error::CapacityExceeded {
                needed: appended + 1,
                available: free,
            });
        }
        Ok(appended)
    }

    /// Removes the largest live element.
    ///
    /// The slot becomes dead data; storage is not shrunk.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] on an empty prefix, [`Error::Detached`]
    /// without a store.
    pub fn pop_back(&mut self) -> Result<(), Error> {
        let Inner::Attached { live, .. } = &mut self.inner else {
            return Err(Error::Detached);
        };
        if *live == 0 {
            return Err(Error::EmptyContainer);
        }
        *live -= 1;
        Ok(())
    }

    /// Removes the largest live element and returns a copy of it.
    ///
    /// # Errors
    ///
    /// Same as [`pop_back`](Self::pop_back).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedbuf::{SortedBuffer, ascending};
    ///
    /// let mut buffer = SortedBuffer::acquire(vec![2, 9, 5], ascending);
    /// assert_eq!(buffer.take_back(), Ok(9));
    /// assert_eq!(buffer.len(), 2);
    /// ```
    pub fn take_back(&mut self) -> Result<S::Item, Error>
    where
        S::Item: Clone,
    {
        let Inner::Attached { store, live } = &mut self.inner else {
            return Err(Error::Detached);
        };
        if *live == 0 {
            return Err(Error::EmptyContainer);
        }
        let value = store.as_slice()[*live - 1].clone();
        *live -= 1;
        Ok(value)
    }

    /// Removes the elements at sorted positions `range`, obtained from this
    /// buffer's own query surface (see [`SortedView::positions`]).
    ///
    /// Stores with native range removal shift their tail down; otherwise the
    /// doomed elements are rotated past the live prefix and become dead
    /// slots. Returns the number of elements removed.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRange`] when `range` is inverted or reaches past the
    /// live prefix, [`Error::Detached`] without a store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedbuf::{SortedBuffer, ascending};
    ///
    /// let mut buffer = SortedBuffer::acquire(vec![1, 7, 7, 7, 9], ascending);
    /// let doomed = buffer.equal_range(&7).unwrap().positions();
    /// assert_eq!(buffer.remove_range(doomed), Ok(3));
    /// assert_eq!(buffer.view().unwrap().as_slice(), &[1, 9]);
    /// ```
    pub fn remove_range(&mut self, range: Range<usize>) -> Result<usize, Error> {
        let Inner::Attached { store, live } = &mut self.inner else {
            return Err(Error::Detached);
        };
        if range.start > range.end || range.end > *live {
            return Err(Error::InvalidRange {
                start: range.start,
                end: range.end,
                live: *live,
            });
        }
        let count = range.len();
        if count == 0 {
            return Ok(0);
        }
        if !store.try_remove_span(range.clone()) {
            store.as_mut_slice()[range.start..*live].rotate_left(count);
        }
        *live -= count;
        Ok(count)
    }

    /// The smallest live element.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] on an empty prefix, [`Error::Detached`]
    /// without a store.
    pub fn front(&self) -> Result<&S::Item, Error> {
        self.live_slice()?.first().ok_or(Error::EmptyContainer)
    }

    /// The largest live element.
    ///
    /// # Errors
    ///
    /// Same as [`front`](Self::front).
    pub fn back(&self) -> Result<&S::Item, Error> {
        self.live_slice()?.last().ok_or(Error::EmptyContainer)
    }

    /// The element at sorted position `position`, or `None` outside the live
    /// prefix (or when detached).
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&S::Item> {
        self.live_slice().ok()?.get(position)
    }

    /// A read-only view over the whole live prefix.
    ///
    /// The view borrows the buffer's storage; no mutation is possible through
    /// it, and the borrow checker rejects any mutating call on the buffer
    /// while the view is alive.
    ///
    /// # Errors
    ///
    /// [`Error::Detached`] without a store.
    pub fn view(&self) -> Result<SortedView<'_, S::Item>, Error> {
        Ok(SortedView::new(self.live_slice()?, 0))
    }

    /// The subview of elements ordered strictly before `value`.
    ///
    /// One `partition_point` binary search, O(log n) comparator calls.
    ///
    /// # Errors
    ///
    /// [`Error::Detached`] without a store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedbuf::{SortedBuffer, ascending};
    ///
    /// let buffer = SortedBuffer::acquire(vec![1, 3, 3, 5], ascending);
    /// assert_eq!(buffer.lower_bound(&3).unwrap().as_slice(), &[1]);
    /// assert_eq!(buffer.upper_bound(&3).unwrap().as_slice(), &[5]);
    /// assert_eq!(buffer.equal_range(&3).unwrap().as_slice(), &[3, 3]);
    /// ```
    pub fn lower_bound(&self, value: &S::Item) -> Result<SortedView<'_, S::Item>, Error> {
        let slice = self.live_slice()?;
        let less = &self.comparator;
        let cut = slice.partition_point(|element| less(element, value));
        Ok(SortedView::new(&slice[..cut], 0))
    }

    /// The subview of elements ordered strictly after `value`.
    ///
    /// # Errors
    ///
    /// [`Error::Detached`] without a store.
    pub fn upper_bound(&self, value: &S::Item) -> Result<SortedView<'_, S::Item>, Error> {
        let slice = self.live_slice()?;
        let less = &self.comparator;
        let cut = slice.partition_point(|element| !less(value, element));
        Ok(SortedView::new(&slice[cut..], cut))
    }

    /// The subview of elements comparator-equivalent to `value`: everything
    /// between [`lower_bound`](Self::lower_bound) and
    /// [`upper_bound`](Self::upper_bound). May be empty.
    ///
    /// # Errors
    ///
    /// [`Error::Detached`] without a store.
    pub fn equal_range(&self, value: &S::Item) -> Result<SortedView<'_, S::Item>, Error> {
        let slice = self.live_slice()?;
        let less = &self.comparator;
        let low = slice.partition_point(|element| less(element, value));
        let high = slice.partition_point(|element| !less(value, element));
        Ok(SortedView::new(&slice[low..high], low))
    }

    fn live_slice(&self) -> Result<&[S::Item], Error> {
        match &self.inner {
            Inner::Detached => Err(Error::Detached),
            Inner::Attached { store, live } => Ok(&store.as_slice()[..*live]),
        }
    }
}

impl<S, F> Index<usize> for SortedBuffer<S, F>
where
    S: FixedStore,
    F: Fn(&S::Item, &S::Item) -> bool,
{
    type Output = S::Item;

    /// Position access without an error channel.
    ///
    /// # Panics
    ///
    /// Panics outside the live prefix; use [`get`](SortedBuffer::get) for the
    /// checked variant.
    fn index(&self, position: usize) -> &S::Item {
        match self.get(position) {
            Some(element) => element,
            None => panic!("position {position} is outside the live prefix"),
        }
    }
}

impl<S, F> std::fmt::Debug for SortedBuffer<S, F>
where
    S: FixedStore,
    S::Item: std::fmt::Debug,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Inner::Detached => formatter.write_str("SortedBuffer(detached)"),
            Inner::Attached { store, live } => formatter
                .debug_tuple("SortedBuffer")
                .field(&&store.as_slice()[..*live])
                .finish(),
        }
    }
}

static_assertions::assert_impl_all!(
    SortedBuffer<Vec<i32>, fn(&i32, &i32) -> bool>: Send, std::fmt::Debug
);
static_assertions::assert_not_impl_any!(
    SortedBuffer<Vec<i32>, fn(&i32, &i32) -> bool>: Clone
);
