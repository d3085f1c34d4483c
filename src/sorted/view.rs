//! Read-only views into a sorted buffer's live prefix.

use std::ops::{Index, Range};

/// A read-only view over a contiguous run of a buffer's live prefix.
///
/// Views are produced by [`SortedBuffer::view`](super::SortedBuffer::view)
/// and the bound queries; they borrow the buffer's storage directly, so no
/// copy is made and the borrow checker rejects any mutating call on the
/// buffer while a view is alive. The view itself exposes no mutation entry
/// points at all.
///
/// A view remembers where it sits inside the live prefix:
/// [`positions`](Self::positions) yields the sorted positions it covers,
/// which is the currency [`remove_range`](super::SortedBuffer::remove_range)
/// accepts.
///
/// # Examples
///
/// ```rust
/// use sortedbuf::{SortedBuffer, descending};
///
/// let buffer = SortedBuffer::acquire(vec![4, 1, 3, 2, 16, 9, 10, 14, 8, 7], descending);
/// let at_least_eight = buffer.lower_bound(&7).unwrap();
/// assert_eq!(at_least_eight.as_slice(), &[16, 14, 10, 9, 8]);
/// assert_eq!(at_least_eight.positions(), 0..5);
///
/// let top_three: Vec<i32> = at_least_eight.iter().take(3).copied().collect();
/// assert_eq!(top_three, vec![16, 14, 10]);
/// ```
#[derive(Clone, Copy)]
pub struct SortedView<'a, T> {
    slice: &'a [T],
    offset: usize,
}

impl<'a, T> SortedView<'a, T> {
    pub(crate) const fn new(slice: &'a [T], offset: usize) -> Self {
        Self { slice, offset }
    }

    /// Number of elements the view covers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slice.len()
    }

    /// Whether the view covers no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slice.is_empty()
    }

    /// The view's elements as a plain slice.
    #[must_use]
    pub const fn as_slice(&self) -> &'a [T] {
        self.slice
    }

    /// The smallest element in view, or `None` when empty.
    #[must_use]
    pub const fn first(&self) -> Option<&'a T> {
        self.slice.first()
    }

    /// The largest element in view, or `None` when empty.
    #[must_use]
    pub const fn last(&self) -> Option<&'a T> {
        self.slice.last()
    }

    /// The element at view-relative index `index`, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.slice.get(index)
    }

    /// The sorted positions this view covers inside the owning buffer's live
    /// prefix.
    #[must_use]
    pub const fn positions(&self) -> Range<usize> {
        self.offset..self.offset + self.slice.len()
    }

    /// Iterates over the view's elements in sorted order.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.slice.iter()
    }
}

impl<T> Index<usize> for SortedView<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.slice[index]
    }
}

impl<'a, T> IntoIterator for SortedView<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slice.iter()
    }
}

impl<'a, T> IntoIterator for &SortedView<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.slice.iter()
    }
}

impl<T: PartialEq> PartialEq for SortedView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.slice == other.slice
    }
}

impl<T: PartialEq> PartialEq<[T]> for SortedView<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.slice == other
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SortedView<'_, T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_tuple("SortedView")
            .field(&self.slice)
            .finish()
    }
}

// The read-only contract, pinned at compile time: a view is freely copyable
// and shareable, and offers no mutable indexing.
static_assertions::assert_impl_all!(SortedView<'static, i32>: Send, Sync, Copy);
static_assertions::assert_not_impl_any!(SortedView<'static, i32>: std::ops::IndexMut<usize>);
