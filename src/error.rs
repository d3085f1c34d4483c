//! Error types for sorted-buffer operations.
//!
//! Every fallible operation on [`SortedBuffer`](crate::sorted::SortedBuffer)
//! reports one of the variants in [`Error`]. There is no retry or recovery
//! logic anywhere in this crate; errors are returned to the immediate caller,
//! which decides whether to retry, skip, or abort.
//!
//! Sortedness violations caused by precondition breaches (misusing
//! [`assume`](crate::sorted::SortedBuffer::assume), mutating a store after
//! handing it over) are not represented here: they are checked only under
//! `debug_assertions` and raise a panic, keeping internal-invariant failures
//! distinct from these user-facing error kinds.

/// Errors reported by [`SortedBuffer`](crate::sorted::SortedBuffer) operations.
///
/// # Examples
///
/// ```rust
/// use sortedbuf::{Error, SortedBuffer, ascending};
///
/// let mut buffer = SortedBuffer::acquire([3, 1, 2], ascending);
/// assert_eq!(
///     buffer.insert(4),
///     Err(Error::CapacityExceeded { needed: 1, available: 0 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `front`, `back`, `pop_back`, or `take_back` was called while the live
    /// prefix is empty.
    EmptyContainer,
    /// An insertion did not fit into a store that cannot grow.
    CapacityExceeded {
        /// Number of free slots the insertion needed.
        needed: usize,
        /// Number of free slots that were actually available.
        available: usize,
    },
    /// `remove_range` was called with positions that do not lie inside the
    /// live prefix of this buffer.
    InvalidRange {
        /// Requested start position.
        start: usize,
        /// Requested end position (exclusive).
        end: usize,
        /// Length of the live prefix at the time of the call.
        live: usize,
    },
    /// A non-lifecycle operation was invoked on a buffer that does not
    /// currently own a store.
    Detached,
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContainer => {
                write!(formatter, "operation requires at least one live element")
            }
            Self::CapacityExceeded { needed, available } => {
                write!(
                    formatter,
                    "store cannot grow: {needed} slot(s) needed, {available} available"
                )
            }
            Self::InvalidRange { start, end, live } => {
                write!(
                    formatter,
                    "range {start}..{end} does not lie inside the live prefix 0..{live}"
                )
            }
            Self::Detached => {
                write!(formatter, "buffer does not own a store; attach one first")
            }
        }
    }
}

impl std::error::Error for Error {}
