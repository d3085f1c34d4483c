//! Fixed-capacity store impls: inline arrays and boxed slices.

use super::FixedStore;

impl<T, const N: usize> FixedStore for [T; N] {
    type Item = T;

    fn capacity(&self) -> usize {
        N
    }

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T> FixedStore for Box<[T]> {
    type Item = T;

    fn capacity(&self) -> usize {
        self.len()
    }

    fn as_slice(&self) -> &[T] {
        self
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}
