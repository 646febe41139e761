//! Inversion counting via stable sorting.
//!
//! An inversion is a pair of positions `i < j` whose elements compare strictly
//! greater at `i`. Every counter in this crate reports the exact number of
//! such pairs in a slice range; the merge-sort based ones additionally leave
//! the range stably sorted, which is how they get the answer in
//! O(n log n) instead of O(n^2).

macro_rules! count_impl {
    ($name:expr) => {
        pub struct CountImpl;

        impl crate::InversionCount for CountImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn count<T>(v: &mut [T]) -> u64
            where
                T: Ord + Clone,
            {
                count(v)
            }

            #[inline]
            fn count_by<T, F>(v: &mut [T], compare: F) -> u64
            where
                T: Clone,
                F: FnMut(&T, &T) -> Ordering,
            {
                count_by(v, compare)
            }

            #[inline]
            fn count_range<T>(v: &mut [T], from: usize, to: usize) -> u64
            where
                T: Ord + Clone,
            {
                count_range(v, from, to)
            }

            #[inline]
            fn count_range_by<T, F>(v: &mut [T], from: usize, to: usize, compare: F) -> u64
            where
                T: Clone,
                F: FnMut(&T, &T) -> Ordering,
            {
                count_range_by(v, from, to, compare)
            }
        }
    };
}

/// Common interface of the inversion counter implementations, used by the
/// integration tests and the bench harness to drive them interchangeably.
///
/// The tally type is `u64`, exact for every range of up to 2^32 elements
/// (n * (n - 1) / 2 < 2^63). Callers working past that are responsible for
/// their own arithmetic; the counters do not re-check per addition.
pub trait InversionCount {
    fn name() -> String;

    fn count<T>(v: &mut [T]) -> u64
    where
        T: Ord + Clone;

    fn count_by<T, F>(v: &mut [T], compare: F) -> u64
    where
        T: Clone,
        F: FnMut(&T, &T) -> std::cmp::Ordering;

    fn count_range<T>(v: &mut [T], from: usize, to: usize) -> u64
    where
        T: Ord + Clone;

    fn count_range_by<T, F>(v: &mut [T], from: usize, to: usize, compare: F) -> u64
    where
        T: Clone,
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

pub mod counter;
pub mod patterns;
