//! Top-down merge sort that counts inversions while it sorts.
//!
//! The non-adaptive baseline: always halves the range, no run detection.
//! The recursion swaps the roles of the two buffers at every level, so
//! merged output lands directly where the parent wants to read it and no
//! copy-back step exists.

use std::cmp::Ordering;

use crate::counter::merge_count;

count_impl!("merge");

/// Counts the inversions in `v` under the natural ordering of `T`.
///
/// Sorts `v` stably as a side effect; callers that need the original order
/// must copy first. `T: Clone` seeds the scratch buffer, elements move by
/// swap afterwards.
#[inline]
pub fn count<T>(v: &mut [T]) -> u64
where
    T: Ord + Clone,
{
    count_by(v, |a, b| a.cmp(b))
}

/// Counts the inversions in `v` under `compare`, sorting `v` stably.
///
/// `compare` must be a total order. If it is not, the tally is unspecified
/// and the final order of `v` is unspecified, but `v` always keeps its
/// original set of elements and memory stays intact.
#[inline]
pub fn count_by<T, F>(v: &mut [T], compare: F) -> u64
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    count_range_by(v, 0, len, compare)
}

/// Counts the inversions in `v[from..to)` under the natural ordering,
/// sorting only that range. Panics if the range does not fit `v`.
#[inline]
pub fn count_range<T>(v: &mut [T], from: usize, to: usize) -> u64
where
    T: Ord + Clone,
{
    count_range_by(v, from, to, |a, b| a.cmp(b))
}

/// Counts the inversions in `v[from..to)` under `compare`, sorting only that
/// range. Panics if the range does not fit `v`; the check happens before any
/// element is touched.
pub fn count_range_by<T, F>(v: &mut [T], from: usize, to: usize, mut compare: F) -> u64
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    crate::counter::check_range(v.len(), from, to);

    let range = &mut v[from..to];
    if range.len() < 2 {
        return 0;
    }

    let mut scratch = range.to_vec();

    count_split(&mut scratch, range, &mut |a, b| compare(a, b) == Ordering::Less)
}

/// Sorts `target`, counting its inversions. `source` must hold the same
/// elements as `target` (any order of the same multiset works, the halves
/// are fully rewritten before they are read).
///
/// Each level sorts the two `source` halves by recursing with the buffer
/// roles swapped, then merges them into `target`.
fn count_split<T, F>(source: &mut [T], target: &mut [T], is_less: &mut F) -> u64
where
    F: FnMut(&T, &T) -> bool,
{
    let len = target.len();
    if len < 2 {
        return 0;
    }

    let mid = len / 2;

    let mut inversions = count_split(&mut target[..mid], &mut source[..mid], is_less);
    inversions += count_split(&mut target[mid..], &mut source[mid..], is_less);

    inversions + merge_count(source, target, mid, is_less)
}
