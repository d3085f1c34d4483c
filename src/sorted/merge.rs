//! In-place merge of two adjacent sorted runs.
//!
//! Completing a bulk insertion means merging a freshly sorted trailing block
//! into the sorted leading block it follows. This module does that with the
//! symmetric-merge scheme (rotation plus symmetric binary search), which
//! works purely by element moves: no allocation and no `Clone` bound on the
//! element type. Cost is O((n + m) log(n + m)) comparisons worst case and
//! O(n + m) when the runs barely interleave, which beats re-sorting the whole
//! prefix.

/// Merges the two sorted runs `slice[..mid]` and `slice[mid..]` into one
/// sorted run, in place.
///
/// Both runs must already be sorted by `less`; the caller is responsible for
/// sorting the trailing block first.
pub(crate) fn merge_adjacent<T, F>(slice: &mut [T], mid: usize, less: &F)
where
    F: Fn(&T, &T) -> bool,
{
    let len = slice.len();
    if mid == 0 || mid == len {
        return;
    }
    // Already in order across the boundary.
    if !less(&slice[mid], &slice[mid - 1]) {
        return;
    }
    sym_merge(slice, 0, mid, len, less);
}

/// Symmetric merge of `slice[first..mid]` and `slice[mid..last]`.
///
/// `first < mid < last` must hold and both runs must be sorted.
fn sym_merge<T, F>(slice: &mut [T], first: usize, mid: usize, last: usize, less: &F)
where
    F: Fn(&T, &T) -> bool,
{
    if mid - first == 1 {
        // Lone leading element: binary-search its slot in the trailing run
        // and rotate it into place.
        let mut low = mid;
        let mut high = last;
        while low < high {
            let probe = (low + high) / 2;
            if less(&slice[probe], &slice[first]) {
                low = probe + 1;
            } else {
                high = probe;
            }
        }
        slice[first..low].rotate_left(1);
        return;
    }
    if last - mid == 1 {
        // Lone trailing element, mirrored.
        let mut low = first;
        let mut high = mid;
        while low < high {
            let probe = (low + high) / 2;
            if less(&slice[mid], &slice[probe]) {
                high = probe;
            } else {
                low = probe + 1;
            }
        }
        slice[low..=mid].rotate_right(1);
        return;
    }

    let center = (first + last) / 2;
    let total = center + mid;
    let (mut low, mut high) = if mid > center {
        (total - last, center)
    } else {
        (first, mid)
    };
    let mirror = total - 1;
    while low < high {
        let probe = (low + high) / 2;
        if less(&slice[mirror - probe], &slice[probe]) {
            high = probe;
        } else {
            low = probe + 1;
        }
    }
    let end = total - low;
    if low < mid && mid < end {
        slice[low..end].rotate_left(mid - low);
    }
    if first < low && low < center {
        sym_merge(slice, first, low, center, less);
    }
    if center < end && end < last {
        sym_merge(slice, center, end, last, less);
    }
}
