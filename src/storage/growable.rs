//! Growable store impls: `Vec` and, behind the `smallvec` feature,
//! `SmallVec`.
//!
//! Both override the [`FixedStore`] capability hooks to delegate to their
//! [`GrowableStore`] methods, which is what makes the sorted buffer's
//! growable insertion and removal paths kick in for them.

use std::ops::Range;

use super::{FixedStore, GrowableStore};

impl<T> FixedStore for Vec<T> {
    type Item = T;

    const GROWABLE: bool = true;

    fn capacity(&self) -> usize {
        // Addressable slots, not allocation size: slots past `len()` hold no
        // initialized element and must not be handed out.
        self.len()
    }

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    fn grow_one(&mut self, item: T) -> Result<(), T> {
        GrowableStore::append(self, item);
        Ok(())
    }

    fn grow_from_iter<I>(&mut self, items: I) -> usize
    where
        I: Iterator<Item = T>,
    {
        let before = self.len();
        self.append_many(items);
        self.len() - before
    }

    fn reserve_hint(&mut self, additional: usize) {
        GrowableStore::reserve(self, additional);
    }

    fn try_shrink(&mut self, keep: usize) -> bool {
        GrowableStore::truncate(self, keep);
        true
    }

    fn try_remove_span(&mut self, span: Range<usize>) -> bool {
        self.remove_span(span);
        true
    }
}

impl<T> GrowableStore for Vec<T> {
    fn append(&mut self, item: T) {
        self.push(item);
    }

    fn append_many<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.extend(items);
    }

    fn reserve(&mut self, additional: usize) {
        Self::reserve(self, additional);
    }

    fn truncate(&mut self, keep: usize) {
        Self::truncate(self, keep);
    }

    fn remove_span(&mut self, span: Range<usize>) {
        self.drain(span);
    }
}

#[cfg(feature = "smallvec")]
impl<A: smallvec::Array> FixedStore for smallvec::SmallVec<A> {
    type Item = A::Item;

    const GROWABLE: bool = true;

    fn capacity(&self) -> usize {
        self.len()
    }

    fn as_slice(&self) -> &[A::Item] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [A::Item] {
        self
    }

    fn grow_one(&mut self, item: A::Item) -> Result<(), A::Item> {
        GrowableStore::append(self, item);
        Ok(())
    }

    fn grow_from_iter<I>(&mut self, items: I) -> usize
    where
        I: Iterator<Item = A::Item>,
    {
        let before = self.len();
        self.append_many(items);
        self.len() - before
    }

    fn reserve_hint(&mut self, additional: usize) {
        GrowableStore::reserve(self, additional);
    }

    fn try_shrink(&mut self, keep: usize) -> bool {
        GrowableStore::truncate(self, keep);
        true
    }

    fn try_remove_span(&mut self, span: Range<usize>) -> bool {
        self.remove_span(span);
        true
    }
}

#[cfg(feature = "smallvec")]
impl<A: smallvec::Array> GrowableStore for smallvec::SmallVec<A> {
    fn append(&mut self, item: A::Item) {
        self.push(item);
    }

    fn append_many<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = A::Item>,
    {
        self.extend(items);
    }

    fn reserve(&mut self, additional: usize) {
        Self::reserve(self, additional);
    }

    fn truncate(&mut self, keep: usize) {
        Self::truncate(self, keep);
    }

    fn remove_span(&mut self, span: Range<usize>) {
        self.drain(span);
    }
}
