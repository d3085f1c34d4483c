//! Shared handles over one logical sorted buffer.
//!
//! A [`SortedBuffer`](super::SortedBuffer) is exclusively owned and
//! deliberately not `Clone`. When several places need to refer to the same
//! logical buffer, they go through [`SharedSortedBuffer`]: cloning a handle
//! shares the one underlying buffer, and an independent copy is only made on
//! an explicit [`duplicate`](SharedSortedBuffer::duplicate) request.
//!
//! The crate is single-threaded by design, so handles are reference-counted
//! with `Rc` and interior mutability goes through `RefCell`; handles are
//! neither `Send` nor `Sync`.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use crate::error::Error;
use crate::storage::FixedStore;

use super::{SortedBuffer, SortedView};

/// A cloneable handle to a shared [`SortedBuffer`].
///
/// All handles observe every mutation made through any of them. Because the
/// underlying buffer sits behind a `RefCell`, element access returns clones
/// rather than references; borrowed queries go through
/// [`with_view`](Self::with_view), which scopes the borrow to a closure.
///
/// # Examples
///
/// ```rust
/// use sortedbuf::{SharedSortedBuffer, SortedBuffer, ascending};
///
/// let first = SharedSortedBuffer::new(SortedBuffer::acquire(vec![3, 1], ascending));
/// let second = first.clone();
///
/// second.insert(2).unwrap();
/// assert_eq!(first.len(), 3);
///
/// // An independent snapshot no longer tracks the original.
/// let snapshot = first.duplicate();
/// first.insert(9).unwrap();
/// assert_eq!(snapshot.len(), 3);
/// assert_eq!(first.len(), 4);
/// ```
pub struct SharedSortedBuffer<S: FixedStore, F = fn(&<S as FixedStore>::Item, &<S as FixedStore>::Item) -> bool> {
    buffer: Rc<RefCell<SortedBuffer<S, F>>>,
}

impl<S: FixedStore, F> Clone for SharedSortedBuffer<S, F> {
    /// Shares the underlying buffer; no element is copied.
    fn clone(&self) -> Self {
        Self {
            buffer: Rc::clone(&self.buffer),
        }
    }
}

impl<S, F> SharedSortedBuffer<S, F>
where
    S: FixedStore,
    F: Fn(&S::Item, &S::Item) -> bool,
{
    /// Wraps `buffer` into a shared handle.
    #[must_use]
    pub fn new(buffer: SortedBuffer<S, F>) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(buffer)),
        }
    }

    /// Number of handles currently sharing the underlying buffer.
    #[must_use]
    pub fn handles(&self) -> usize {
        Rc::strong_count(&self.buffer)
    }

    /// Snapshots an independent copy of the underlying buffer under a fresh
    /// handle. Mutations on either side no longer affect the other.
    #[must_use]
    pub fn duplicate(&self) -> Self
    where
        S: Clone,
        F: Clone,
    {
        Self::new(self.buffer.borrow().duplicate())
    }

    /// See [`SortedBuffer::len`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    /// See [`SortedBuffer::is_empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }

    /// See [`SortedBuffer::capacity`].
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.borrow().capacity()
    }

    /// See [`SortedBuffer::insert`].
    ///
    /// # Errors
    ///
    /// As [`SortedBuffer::insert`].
    pub fn insert(&self, value: S::Item) -> Result<(), Error> {
        self.buffer.borrow_mut().insert(value)
    }

    /// See [`SortedBuffer::insert_many`].
    ///
    /// # Errors
    ///
    /// As [`SortedBuffer::insert_many`].
    pub fn insert_many<I>(&self, values: I) -> Result<usize, Error>
    where
        I: IntoIterator<Item = S::Item>,
    {
        self.buffer.borrow_mut().insert_many(values)
    }

    /// See [`SortedBuffer::pop_back`].
    ///
    /// # Errors
    ///
    /// As [`SortedBuffer::pop_back`].
    pub fn pop_back(&self) -> Result<(), Error> {
        self.buffer.borrow_mut().pop_back()
    }

    /// See [`SortedBuffer::take_back`].
    ///
    /// # Errors
    ///
    /// As [`SortedBuffer::take_back`].
    pub fn take_back(&self) -> Result<S::Item, Error>
    where
        S::Item: Clone,
    {
        self.buffer.borrow_mut().take_back()
    }

    /// See [`SortedBuffer::remove_range`].
    ///
    /// # Errors
    ///
    /// As [`SortedBuffer::remove_range`].
    pub fn remove_range(&self, range: Range<usize>) -> Result<usize, Error> {
        self.buffer.borrow_mut().remove_range(range)
    }

    /// A copy of the smallest live element.
    ///
    /// # Errors
    ///
    /// As [`SortedBuffer::front`].
    pub fn front(&self) -> Result<S::Item, Error>
    where
        S::Item: Clone,
    {
        self.buffer.borrow().front().cloned()
    }

    /// A copy of the largest live element.
    ///
    /// # Errors
    ///
    /// As [`SortedBuffer::back`].
    pub fn back(&self) -> Result<S::Item, Error>
    where
        S::Item: Clone,
    {
        self.buffer.borrow().back().cloned()
    }

    /// Runs `operation` against a read-only view of the live prefix, scoping
    /// the shared borrow to the closure.
    ///
    /// # Errors
    ///
    /// [`Error::Detached`] without a store.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sortedbuf::{SharedSortedBuffer, SortedBuffer, ascending};
    ///
    /// let handle = SharedSortedBuffer::new(SortedBuffer::acquire(vec![2, 1, 3], ascending));
    /// let doubled: Vec<i32> = handle
    ///     .with_view(|view| view.iter().map(|value| value * 2).collect())
    ///     .unwrap();
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// ```
    pub fn with_view<R>(&self, operation: impl FnOnce(SortedView<'_, S::Item>) -> R) -> Result<R, Error> {
        let buffer = self.buffer.borrow();
        Ok(operation(buffer.view()?))
    }

    /// See [`SortedBuffer::release`]. All other handles observe the detach.
    pub fn release(&self) -> Option<S> {
        self.buffer.borrow_mut().release()
    }

    /// See [`SortedBuffer::clear`]. All other handles observe the detach.
    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

static_assertions::assert_not_impl_any!(
    SharedSortedBuffer<Vec<i32>, fn(&i32, &i32) -> bool>: Send, Sync
);
