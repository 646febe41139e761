//! Natural merge sort that counts inversions while it sorts.
//!
//! Instead of starting from single-element runs, the input is scanned once
//! for stretches that are already sorted: non-decreasing stretches are taken
//! as runs directly, strictly decreasing stretches are reversed in place and
//! taken as runs too. The detected run lengths then drive bottom-up merge
//! passes that ping-pong between the caller's slice and one scratch buffer,
//! adding up cross-run inversions as they go. Presorted inputs finish in a
//! single scan, fully random ones degrade to ordinary merge sort cost.

use std::cmp::Ordering;
use std::mem;

use crate::counter::merge_count;

count_impl!("natural_merge");

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

    count_inversions(&mut v[from..to], &mut |a, b| compare(a, b) == Ordering::Less)
}

fn count_inversions<T, F>(v: &mut [T], is_less: &mut F) -> u64
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    if v.len() < 2 {
        return 0;
    }

    let (mut queue, mut inversions) = build_run_length_queue(v, is_less);

    // Snapshot taken after run normalization, so either buffer can serve as
    // the first merge source.
    let mut scratch = v.to_vec();

    // With an odd number of merge passes the scratch buffer must be the
    // first source, so the ping-pong ends with the sorted result in the
    // caller's slice. Decided once here, never re-derived per pass.
    let mut source_is_scratch = merge_pass_count(queue.len()) % 2 == 1;

    while queue.len() > 1 {
        let (source, target) = if source_is_scratch {
            (&mut scratch[..], &mut v[..])
        } else {
            (&mut v[..], &mut scratch[..])
        };

        let mut runs_left = queue.len();
        let mut offset = 0;

        while runs_left > 1 {
            let left_len = queue.dequeue();
            let right_len = queue.dequeue();
            let merged_len = left_len + right_len;

            inversions += merge_count(
                &mut source[offset..offset + merged_len],
                &mut target[offset..offset + merged_len],
                left_len,
                is_less,
            );

            queue.enqueue(merged_len);
            offset += merged_len;
            runs_left -= 2;
        }

        // A pass over an odd run count leaves one run unmerged. Transfer it
        // verbatim so the target buffer holds the complete range before the
        // roles flip; it gets merged in a later pass.
        if runs_left == 1 {
            let last_run_len = queue.dequeue();

            for i in offset..offset + last_run_len {
                mem::swap(&mut source[i], &mut target[i]);
            }

            queue.enqueue(last_run_len);
        }

        source_is_scratch = !source_is_scratch;
    }

    inversions
}

/// Splits `v` into maximal sorted runs, enqueuing their lengths, and returns
/// the queue together with the inversions removed by normalizing descending
/// runs.
///
/// Non-decreasing stretches are taken as-is. Strictly decreasing stretches
/// are reversed in place; strictness matters, two elements that compare
/// equal must never trade places or stability is lost. A strictly decreasing
/// run of length k holds exactly k * (k - 1) / 2 inversions, all of which
/// the reversal erases before any merge can see them, so they are tallied
/// here.
///
/// A run that starts right after a just-reversed one is folded into it when
/// the boundary pair is ordered. The scan never compared that boundary in
/// its normalized orientation, and folding spares a merge that would find
/// zero inversions.
fn build_run_length_queue<T, F>(v: &mut [T], is_less: &mut F) -> (RunLengthQueue, u64)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(len >= 2);

    let mut queue = RunLengthQueue::with_capacity(len / 2 + 2);
    let mut inversions = 0u64;

    let last = len - 1;
    let mut left = 0;
    let mut prev_was_descending = false;

    while left < last {
        let head = left;
        let descending = is_less(&v[left + 1], &v[left]);

        left += 1;

        if descending {
            while left < last && is_less(&v[left + 1], &v[left]) {
                left += 1;
            }

            v[head..=left].reverse();

            let run_len = (left - head + 1) as u64;
            inversions += run_len * (run_len - 1) / 2;
        } else {
            while left < last && !is_less(&v[left + 1], &v[left]) {
                left += 1;
            }
        }

        let run_len = left - head + 1;

        // prev_was_descending implies a previous run exists, so head >= 2.
        if prev_was_descending && !is_less(&v[head], &v[head - 1]) {
            queue.extend_last_run(run_len);
        } else {
            queue.enqueue(run_len);
        }

        prev_was_descending = descending;
        left += 1;
    }

    // Trailing element no pair scan covered; same folding rule as above.
    if left == last {
        if prev_was_descending && !is_less(&v[last], &v[last - 1]) {
            queue.extend_last_run(1);
        } else {
            queue.enqueue(1);
        }
    }

    (queue, inversions)
}

/// Number of bottom-up merge passes needed to reduce `runs` runs to one,
/// i.e. ceil(log2(runs)).
fn merge_pass_count(runs: usize) -> u32 {
    debug_assert!(runs >= 1);

    usize::BITS - (runs - 1).leading_zeros()
}

/// Fixed-capacity ring buffer of pending run lengths, consumed oldest-first.
///
/// Head and tail wrap with a power-of-two mask instead of a modulo. The
/// capacity request covers the worst case of the run detector (every run of
/// length two plus a trailing single), and merging only ever shrinks the
/// queue, so a correctly sized queue cannot overflow; the checks are debug
/// asserts, not recoverable errors.
struct RunLengthQueue {
    storage: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
    mask: usize,
}

impl RunLengthQueue {
    /// `capacity` is rounded up to the next power of two.
    fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.next_power_of_two();

        Self {
            storage: vec![0; capacity],
            head: 0,
            tail: 0,
            len: 0,
            mask: capacity - 1,
        }
    }

    fn enqueue(&mut self, run_len: usize) {
        debug_assert!(self.len <= self.mask, "run length queue overflow");

        self.storage[self.tail] = run_len;
        self.tail = (self.tail + 1) & self.mask;
        self.len += 1;
    }

    fn dequeue(&mut self) -> usize {
        debug_assert!(self.len > 0, "dequeue on empty run length queue");

        let run_len = self.storage[self.head];
        self.head = (self.head + 1) & self.mask;
        self.len -= 1;

        run_len
    }

    /// Adds `delta` to the most recently enqueued, not yet dequeued length.
    fn extend_last_run(&mut self, delta: usize) {
        debug_assert!(self.len > 0, "extend_last_run on empty run length queue");

        let last = self.tail.wrapping_sub(1) & self.mask;
        self.storage[last] += delta;
    }

    fn len(&self) -> usize {
        self.len
    }
}
