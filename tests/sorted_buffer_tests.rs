//! Unit tests for SortedBuffer lifecycle, insertion, removal, and queries,
//! over both fixed-capacity and growable stores.

use rstest::rstest;
use sortedbuf::{Error, SortedBuffer, ascending, descending};

const SCRAMBLED: [i32; 10] = [4, 1, 3, 2, 16, 9, 10, 14, 8, 7];
const ASCENDING_ORDER: [i32; 10] = [1, 2, 3, 4, 7, 8, 9, 10, 14, 16];
const DESCENDING_ORDER: [i32; 10] = [16, 14, 10, 9, 8, 7, 4, 3, 2, 1];

// =============================================================================
// Lifecycle
// =============================================================================

#[rstest]
fn test_acquire_sorts_the_whole_store() {
    let buffer = SortedBuffer::acquire(SCRAMBLED.to_vec(), ascending);
    assert_eq!(buffer.view().unwrap().as_slice(), &ASCENDING_ORDER);
    assert_eq!(buffer.front(), Ok(&1));
    assert_eq!(buffer.back(), Ok(&16));
}

#[rstest]
fn test_acquire_with_descending_comparator() {
    let buffer = SortedBuffer::acquire(SCRAMBLED.to_vec(), descending);
    assert_eq!(buffer.view().unwrap().as_slice(), &DESCENDING_ORDER);
    assert_eq!(buffer.front(), Ok(&16));
    assert_eq!(buffer.back(), Ok(&1));
}

#[rstest]
fn test_acquire_prefix_limits_the_live_length() {
    let buffer = SortedBuffer::acquire_prefix([9, 7, 8, 42, 42], 3, ascending);
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.capacity(), 5);
    assert_eq!(buffer.view().unwrap().as_slice(), &[7, 8, 9]);
}

#[rstest]
fn test_acquire_prefix_clamps_oversized_initial() {
    let buffer = SortedBuffer::acquire_prefix(vec![2, 1], 100, ascending);
    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.view().unwrap().as_slice(), &[1, 2]);
}

#[rstest]
fn test_assume_skips_the_sort_pass() {
    let buffer = SortedBuffer::assume(ASCENDING_ORDER.to_vec(), ascending);
    assert_eq!(buffer.view().unwrap().as_slice(), &ASCENDING_ORDER);
}

#[rstest]
fn test_detached_buffer_tolerates_size_queries() {
    let buffer: SortedBuffer<Vec<i32>, _> = SortedBuffer::detached(ascending);
    assert!(buffer.is_detached());
    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.capacity(), 0);
}

#[rstest]
fn test_detached_buffer_rejects_everything_else() {
    let mut buffer: SortedBuffer<Vec<i32>, _> = SortedBuffer::detached(ascending);
    assert_eq!(buffer.front(), Err(Error::Detached));
    assert_eq!(buffer.back(), Err(Error::Detached));
    assert_eq!(buffer.insert(1), Err(Error::Detached));
    assert_eq!(buffer.insert_many([1, 2]), Err(Error::Detached));
    assert_eq!(buffer.pop_back(), Err(Error::Detached));
    assert_eq!(buffer.take_back(), Err(Error::Detached));
    assert_eq!(buffer.remove_range(0..0), Err(Error::Detached));
    assert_eq!(buffer.view().unwrap_err(), Error::Detached);
    assert_eq!(buffer.lower_bound(&1).unwrap_err(), Error::Detached);
    assert_eq!(buffer.get(0), None);
}

#[rstest]
fn test_release_returns_the_sorted_prefix_and_detaches() {
    let mut buffer = SortedBuffer::acquire(vec![3, 1, 2], ascending);
    buffer.pop_back().unwrap();

    let store = buffer.release().unwrap();
    assert_eq!(store, vec![1, 2]);
    assert!(buffer.is_detached());
    assert_eq!(buffer.release(), None);
}

#[rstest]
fn test_release_round_trip_through_attach_sorted() {
    let mut buffer = SortedBuffer::acquire(SCRAMBLED.to_vec(), ascending);
    let store = buffer.release().unwrap();

    buffer.attach_sorted(store);
    assert_eq!(buffer.view().unwrap().as_slice(), &ASCENDING_ORDER);
}

#[rstest]
fn test_release_of_fixed_store_keeps_dead_tail() {
    let mut buffer = SortedBuffer::acquire([3, 1, 2], ascending);
    buffer.pop_back().unwrap();

    // A plain array cannot shrink; only the leading former-live part is
    // meaningful.
    let store = buffer.release().unwrap();
    assert_eq!(&store[..2], &[1, 2]);
}

#[rstest]
fn test_clear_discards_the_store() {
    let mut buffer = SortedBuffer::acquire(vec![3, 1, 2], ascending);
    buffer.clear();
    assert!(buffer.is_detached());
    assert_eq!(buffer.release(), None);
}

#[rstest]
fn test_attach_sorts_a_new_store() {
    let mut buffer = SortedBuffer::acquire(vec![5], ascending);
    buffer.attach(vec![9, 3, 6]);
    assert_eq!(buffer.view().unwrap().as_slice(), &[3, 6, 9]);
}

#[rstest]
fn test_duplicate_is_independent_both_ways() {
    let mut source = SortedBuffer::acquire(vec![2, 1, 3], ascending);
    let mut copy = source.duplicate();

    source.insert(0).unwrap();
    copy.pop_back().unwrap();

    assert_eq!(source.view().unwrap().as_slice(), &[0, 1, 2, 3]);
    assert_eq!(copy.view().unwrap().as_slice(), &[1, 2]);
}

#[rstest]
fn test_duplicate_of_detached_buffer_is_detached() {
    let buffer: SortedBuffer<Vec<i32>, _> = SortedBuffer::detached(ascending);
    assert!(buffer.duplicate().is_detached());
}

// =============================================================================
// Insertion
// =============================================================================

#[rstest]
fn test_insert_keeps_the_prefix_sorted() {
    let mut buffer = SortedBuffer::acquire(vec![1, 5, 9], ascending);
    buffer.insert(7).unwrap();
    buffer.insert(0).unwrap();
    buffer.insert(12).unwrap();
    assert_eq!(buffer.view().unwrap().as_slice(), &[0, 1, 5, 7, 9, 12]);
}

#[rstest]
fn test_insert_reuses_dead_slots_before_growing() {
    let mut buffer = SortedBuffer::acquire(vec![1, 2, 3], ascending);
    buffer.pop_back().unwrap();
    assert_eq!(buffer.capacity(), 3);

    // The popped slot is reused: the store does not grow.
    buffer.insert(0).unwrap();
    assert_eq!(buffer.capacity(), 3);
    assert_eq!(buffer.view().unwrap().as_slice(), &[0, 1, 2]);
}

#[rstest]
fn test_insert_into_fixed_store_with_free_slots() {
    let mut buffer = SortedBuffer::acquire_prefix([0_i32; 4], 0, ascending);
    buffer.insert(3).unwrap();
    buffer.insert(1).unwrap();
    buffer.insert(2).unwrap();
    assert_eq!(buffer.view().unwrap().as_slice(), &[1, 2, 3]);
}

#[rstest]
fn test_insert_into_full_fixed_store_fails_and_changes_nothing() {
    // Scenario: a fixed-capacity store already at capacity.
    let mut buffer = SortedBuffer::acquire([3, 1, 2], ascending);
    assert_eq!(
        buffer.insert(4),
        Err(Error::CapacityExceeded {
            needed: 1,
            available: 0
        })
    );
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.view().unwrap().as_slice(), &[1, 2, 3]);
}

#[rstest]
fn test_insert_equal_elements_are_kept() {
    let mut buffer = SortedBuffer::acquire(vec![5, 5], ascending);
    buffer.insert(5).unwrap();
    assert_eq!(buffer.view().unwrap().as_slice(), &[5, 5, 5]);
}

#[rstest]
fn test_insert_many_merges_into_the_prefix() {
    let mut buffer = SortedBuffer::acquire(vec![2, 4, 6, 8], ascending);
    assert_eq!(buffer.insert_many([7, 1, 5, 3]), Ok(4));
    assert_eq!(
        buffer.view().unwrap().as_slice(),
        &[1, 2, 3, 4, 5, 6, 7, 8]
    );
}

#[rstest]
fn test_insert_many_into_empty_buffer() {
    let mut buffer = SortedBuffer::acquire(Vec::new(), ascending);
    assert_eq!(buffer.insert_many([3, 1, 2]), Ok(3));
    assert_eq!(buffer.view().unwrap().as_slice(), &[1, 2, 3]);
}

#[rstest]
fn test_insert_many_empty_iterator_is_a_noop() {
    let mut buffer = SortedBuffer::acquire(vec![1, 2], ascending);
    assert_eq!(buffer.insert_many(std::iter::empty()), Ok(0));
    assert_eq!(buffer.view().unwrap().as_slice(), &[1, 2]);
}

#[rstest]
fn test_insert_many_fails_fast_on_oversized_exact_batch() {
    let mut buffer = SortedBuffer::acquire_prefix([0_i32; 4], 2, ascending);
    assert_eq!(
        buffer.insert_many([1, 2, 3]),
        Err(Error::CapacityExceeded {
            needed: 3,
            available: 2
        })
    );
    // Nothing was committed.
    assert_eq!(buffer.len(), 2);
}

#[rstest]
fn test_insert_many_partial_commit_stays_sorted() {
    let mut buffer = SortedBuffer::acquire_prefix([9, 9, 0, 0, 0], 2, ascending);

    // A filtered iterator has no exact size hint, so the failure only shows
    // up mid-batch; the three elements that fit must still be merged in.
    let result = buffer.insert_many((1..=4).filter(|_| true));
    assert!(matches!(result, Err(Error::CapacityExceeded { .. })));
    assert_eq!(buffer.len(), 5);
    assert_eq!(buffer.view().unwrap().as_slice(), &[1, 2, 3, 9, 9]);
}

#[rstest]
fn test_insert_many_fills_dead_slots_of_a_growable_store() {
    let mut buffer = SortedBuffer::acquire(vec![1, 2, 3, 4], ascending);
    buffer.remove_range(1..3).unwrap();
    assert_eq!(buffer.len(), 2);

    assert_eq!(buffer.insert_many([9, 0, 5]), Ok(3));
    assert_eq!(buffer.view().unwrap().as_slice(), &[0, 1, 4, 5, 9]);
}

// =============================================================================
// Removal
// =============================================================================

#[rstest]
fn test_pop_back_removes_the_largest() {
    let mut buffer = SortedBuffer::acquire(vec![2, 9, 5], ascending);
    buffer.pop_back().unwrap();
    assert_eq!(buffer.back(), Ok(&5));
}

#[rstest]
fn test_take_back_drains_in_comparator_order_then_fails() {
    // Scenario: a descending buffer hands back 16, 14, ... 1, then reports
    // an empty container.
    let mut buffer = SortedBuffer::acquire(SCRAMBLED.to_vec(), descending);

    let mut drained = Vec::new();
    while let Ok(value) = buffer.take_back() {
        drained.push(value);
    }
    let mut expected = DESCENDING_ORDER.to_vec();
    expected.reverse();
    assert_eq!(drained, expected);
    assert_eq!(buffer.take_back(), Err(Error::EmptyContainer));
    assert_eq!(buffer.pop_back(), Err(Error::EmptyContainer));
}

#[rstest]
fn test_remove_range_from_equal_range_positions() {
    let mut buffer = SortedBuffer::acquire(vec![1, 7, 7, 7, 9], ascending);
    let doomed = buffer.equal_range(&7).unwrap().positions();
    assert_eq!(buffer.remove_range(doomed), Ok(3));
    assert_eq!(buffer.view().unwrap().as_slice(), &[1, 9]);
}

#[rstest]
fn test_remove_range_on_fixed_store_uses_the_swap_fallback() {
    let mut buffer = SortedBuffer::acquire([5, 3, 8, 1, 9], ascending);
    assert_eq!(buffer.remove_range(1..3), Ok(2));
    assert_eq!(buffer.view().unwrap().as_slice(), &[1, 8, 9]);
    assert_eq!(buffer.capacity(), 5);
}

#[rstest]
fn test_remove_range_rejects_out_of_bounds_positions() {
    let mut buffer = SortedBuffer::acquire(vec![1, 2, 3], ascending);
    assert_eq!(
        buffer.remove_range(1..5),
        Err(Error::InvalidRange {
            start: 1,
            end: 5,
            live: 3
        })
    );
    assert_eq!(buffer.len(), 3);
}

#[rstest]
fn test_remove_range_of_zero_length_is_a_noop() {
    let mut buffer = SortedBuffer::acquire(vec![1, 2, 3], ascending);
    assert_eq!(buffer.remove_range(2..2), Ok(0));
    assert_eq!(buffer.len(), 3);
}

#[rstest]
fn test_removed_slots_are_reused_by_later_inserts() {
    let mut buffer = SortedBuffer::acquire([4, 2, 6, 8], ascending);
    buffer.remove_range(0..2).unwrap();
    assert_eq!(buffer.view().unwrap().as_slice(), &[6, 8]);

    buffer.insert(7).unwrap();
    buffer.insert(5).unwrap();
    assert_eq!(buffer.view().unwrap().as_slice(), &[5, 6, 7, 8]);
}

// =============================================================================
// Queries
// =============================================================================

#[rstest]
fn test_get_and_index_agree() {
    let buffer = SortedBuffer::acquire(vec![3, 1, 2], ascending);
    assert_eq!(buffer.get(0), Some(&1));
    assert_eq!(buffer.get(2), Some(&3));
    assert_eq!(buffer.get(3), None);
    assert_eq!(buffer[1], 2);
}

#[rstest]
#[should_panic(expected = "outside the live prefix")]
fn test_index_past_the_live_prefix_panics() {
    let buffer = SortedBuffer::acquire(vec![1, 2], ascending);
    let _ = buffer[2];
}

#[rstest]
fn test_bounds_on_a_descending_buffer() {
    // Scenario: descending comparator over the scrambled input.
    let buffer = SortedBuffer::acquire(SCRAMBLED.to_vec(), descending);

    let top_five: Vec<i32> = buffer.view().unwrap().iter().take(5).copied().collect();
    assert_eq!(top_five, vec![16, 14, 10, 9, 8]);

    assert_eq!(
        buffer.lower_bound(&7).unwrap().as_slice(),
        &[16, 14, 10, 9, 8]
    );
    assert_eq!(buffer.upper_bound(&7).unwrap().as_slice(), &[4, 3, 2, 1]);
    assert_eq!(buffer.equal_range(&7).unwrap().as_slice(), &[7]);
}

#[rstest]
fn test_bounds_with_duplicates() {
    let buffer = SortedBuffer::acquire(vec![1, 3, 3, 3, 5], ascending);
    assert_eq!(buffer.lower_bound(&3).unwrap().as_slice(), &[1]);
    assert_eq!(buffer.equal_range(&3).unwrap().as_slice(), &[3, 3, 3]);
    assert_eq!(buffer.upper_bound(&3).unwrap().as_slice(), &[5]);
}

#[rstest]
fn test_bounds_on_a_missing_value_meet_at_the_gap() {
    let buffer = SortedBuffer::acquire(vec![1, 2, 8, 9], ascending);
    assert_eq!(buffer.lower_bound(&5).unwrap().positions(), 0..2);
    assert_eq!(buffer.equal_range(&5).unwrap().positions(), 2..2);
    assert_eq!(buffer.upper_bound(&5).unwrap().positions(), 2..4);
}

#[rstest]
fn test_view_positions_map_back_to_the_buffer() {
    let buffer = SortedBuffer::acquire(vec![10, 30, 20, 40], ascending);
    let upper = buffer.upper_bound(&20).unwrap();
    assert_eq!(upper.positions(), 2..4);
    for (offset, element) in upper.positions().zip(upper.iter()) {
        assert_eq!(buffer.get(offset), Some(element));
    }
}

#[rstest]
fn test_front_and_back_on_a_made_empty_buffer() {
    let mut buffer = SortedBuffer::acquire(vec![1], ascending);
    buffer.pop_back().unwrap();
    assert_eq!(buffer.front(), Err(Error::EmptyContainer));
    assert_eq!(buffer.back(), Err(Error::EmptyContainer));
    assert!(buffer.view().unwrap().is_empty());
}

// =============================================================================
// Non-Ord elements and custom comparators
// =============================================================================

#[rstest]
fn test_comparator_on_a_projection_of_the_element() {
    #[derive(Clone, Debug, PartialEq)]
    struct Reading {
        sensor: &'static str,
        value: f64,
    }

    let readings = vec![
        Reading { sensor: "b", value: 0.7 },
        Reading { sensor: "a", value: 0.2 },
        Reading { sensor: "c", value: 1.4 },
    ];
    let mut buffer = SortedBuffer::acquire(readings, |a: &Reading, b: &Reading| {
        a.value < b.value
    });
    buffer
        .insert(Reading { sensor: "d", value: 0.5 })
        .unwrap();

    let order: Vec<&'static str> = buffer
        .view()
        .unwrap()
        .iter()
        .map(|reading| reading.sensor)
        .collect();
    assert_eq!(order, vec!["a", "d", "b", "c"]);
}

#[cfg(feature = "smallvec")]
#[rstest]
fn test_smallvec_store_grows_past_inline_capacity() {
    let store: smallvec::SmallVec<[i32; 4]> = smallvec::smallvec![3, 1];
    let mut buffer = SortedBuffer::acquire(store, ascending);
    buffer.insert_many([5, 2, 4, 6, 0]).unwrap();
    assert_eq!(buffer.view().unwrap().as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
}
