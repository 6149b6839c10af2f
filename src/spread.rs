//! The bucketing engine.
//!
//! One level of the pipeline scans a range for its key extremes (returning
//! early if it is already sorted), picks a bucket granularity, counts bucket
//! occupancy into a fixed array, lays bucket storage out with negatives in
//! front, permutes elements into their buckets with cycle-following swaps,
//! and then per bucket either stops, hands off to the comparison sort, or
//! re-enters the pipeline on the sub-range.
//!
//! Bucket boundaries live in a growable bin cache shared across recursion
//! levels through `(offset, end)` windows; the swap cursors occupy the same
//! slots and become the recorded bucket ends once each bucket is exhausted.

use core::cmp::Ordering;

use crate::key::{sign_corrected_cmp, Key};
use crate::tuning::Tuning;

/// Runs the engine over `v`.
///
/// `rshift(x, n)` must equal `rshift(x, 0) >> n` (arithmetic shift).
/// `fallback` is the comparison-sort collaborator: it must sort a sub-range
/// in place under the same total order the sign-corrected keys induce, and
/// it receives the projection back so key-derived collaborators can use it.
pub(crate) fn spread_sort<T, K, R, F>(v: &mut [T], mut rshift: R, mut fallback: F, tuning: &Tuning)
where
    K: Key,
    R: FnMut(&T, u32) -> K,
    F: FnMut(&mut [T], &mut R),
{
    tuning.assert_valid();
    if v.len() < 2 {
        return;
    }
    if v.len() < tuning.min_sort_size {
        fallback(v, &mut rshift);
        return;
    }
    // One counting array for the whole call; levels reuse it without
    // reallocating. The bin cache grows as recursion discovers buckets.
    let mut bin_sizes = vec![0usize; tuning.bin_capacity()];
    let mut bin_cache: Vec<usize> = Vec::new();
    spread_rec(
        v,
        &mut rshift,
        &mut fallback,
        &mut bin_cache,
        0,
        &mut bin_sizes,
        tuning,
    );
}

/// One pass over `v`: smallest and largest projected key, or `None` if every
/// adjacent pair is already non-decreasing under the sign-corrected key
/// order. A single inversion anywhere disqualifies the range.
fn is_sorted_or_find_extremes<T, K, R>(v: &[T], rshift: &mut R) -> Option<(K, K)>
where
    K: Key,
    R: FnMut(&T, u32) -> K,
{
    debug_assert!(v.len() >= 2);
    let mut prev = rshift(&v[0], 0);
    let mut min = prev;
    let mut max = prev;
    let mut sorted = true;
    for x in &v[1..] {
        let key = rshift(x, 0);
        sorted &= sign_corrected_cmp(prev, key) != Ordering::Greater;
        prev = key;
        if max < key {
            max = key;
        } else if key < min {
            min = key;
        }
    }
    if sorted {
        None
    } else {
        Some((min, max))
    }
}

/// Zeroes this level's counting slots and grows the bin cache to cover the
/// `[cache_offset, cache_end)` window. Returns `cache_end`.
fn size_bins(
    bin_cache: &mut Vec<usize>,
    cache_offset: usize,
    bin_sizes: &mut [usize],
    bin_count: usize,
) -> usize {
    debug_assert!(bin_count <= bin_sizes.len(), "divisor clamping failed");
    bin_sizes[..bin_count].fill(0);
    let cache_end = cache_offset + bin_count;
    if bin_cache.len() < cache_end {
        bin_cache.resize(cache_end, 0);
    }
    cache_end
}

/// Swaps elements into bucket `u` until its cursor reaches `next_bin_start`.
///
/// Each misplaced element is chased into its own bucket: a two-way swap when
/// the displaced element belongs to `u`, otherwise a three-way rotation that
/// also drops the displaced element directly into its target bucket. Every
/// swap finalizes at least one element, so the whole level stays O(n).
fn inner_swap_loop<T, K, R>(
    v: &mut [T],
    bins: &mut [usize],
    u: usize,
    next_bin_start: usize,
    rshift: &mut R,
    log_divisor: u32,
    div_min: K,
) where
    K: Key,
    R: FnMut(&T, u32) -> K,
{
    let mut current = bins[u];
    while current < next_bin_start {
        loop {
            let target = rshift(&v[current], log_divisor).offset_from(div_min) as usize;
            if target == u {
                break;
            }
            let b = bins[target];
            bins[target] += 1;
            let b_target = rshift(&v[b], log_divisor).offset_from(div_min) as usize;
            if b_target != u {
                let c = bins[b_target];
                bins[b_target] += 1;
                v.swap(b, c);
            }
            v.swap(current, b);
        }
        current += 1;
    }
    bins[u] = next_bin_start;
}

/// A full pipeline level that may hold both negative- and positive-keyed
/// elements; only the top level can. Negative buckets are stored at the
/// front in descending index order, positives after them ascending, so the
/// finished range reads in sign-corrected key order. Produced buckets
/// re-enter through [`negative_rec`] or [`positive_rec`], which never have
/// to re-split signs.
fn spread_rec<T, K, R, F>(
    v: &mut [T],
    rshift: &mut R,
    fallback: &mut F,
    bin_cache: &mut Vec<usize>,
    cache_offset: usize,
    bin_sizes: &mut [usize],
    tuning: &Tuning,
) where
    K: Key,
    R: FnMut(&T, u32) -> K,
    F: FnMut(&mut [T], &mut R),
{
    let (min, max) = match is_sorted_or_find_extremes(v, rshift) {
        None => return,
        Some(extremes) => extremes,
    };
    let log_divisor = tuning.log_divisor(v.len(), K::range_bits(min, max));
    let div_min = min.shift_right(log_divisor);
    let div_max = max.shift_right(log_divisor);
    let bin_count = div_max.offset_from(div_min) as usize + 1;
    let cache_end = size_bins(bin_cache, cache_offset, bin_sizes, bin_count);

    for x in v.iter() {
        bin_sizes[rshift(x, log_divisor).offset_from(div_min) as usize] += 1;
    }
    debug_assert_eq!(bin_sizes[..bin_count].iter().sum::<usize>(), v.len());

    // Index of the first bucket holding non-negative keys, clamped in case
    // every bucket is negative.
    let first_positive = if div_min.is_negative() {
        K::ZERO.offset_from(div_min).min(bin_count as u64) as usize
    } else {
        0
    };

    {
        let bins = &mut bin_cache[cache_offset..cache_end];
        // Assign storage positions; bin_sizes[u] becomes the end offset of
        // bucket u. Negative buckets run front-to-back in descending index
        // order, then positives ascending.
        if first_positive > 0 {
            bins[first_positive - 1] = 0;
            for ii in (0..first_positive - 1).rev() {
                bins[ii] = bin_sizes[ii + 1];
                bin_sizes[ii] += bin_sizes[ii + 1];
            }
            if first_positive < bin_count {
                bins[first_positive] = bin_sizes[0];
                bin_sizes[first_positive] += bin_sizes[0];
            }
        } else {
            bins[0] = 0;
        }
        for u in first_positive..bin_count.saturating_sub(1) {
            bins[u + 1] = bin_sizes[u];
            bin_sizes[u + 1] += bin_sizes[u];
        }

        // Storage order and index order disagree across the sign boundary,
        // so every bucket gets a swap pass here.
        for u in 0..bin_count {
            let next_bin_start = bin_sizes[u];
            inner_swap_loop(v, bins, u, next_bin_start, rshift, log_divisor, div_min);
        }
    }

    if log_divisor == 0 {
        return;
    }

    let max_count = tuning.min_count(log_divisor);
    let mut last_pos = 0usize;
    for ii in (cache_offset..cache_offset + first_positive).rev() {
        let end = bin_cache[ii];
        let count = end - last_pos;
        if count >= 2 {
            if count < max_count {
                fallback(&mut v[last_pos..end], rshift);
            } else {
                negative_rec(
                    &mut v[last_pos..end],
                    rshift,
                    fallback,
                    bin_cache,
                    cache_end,
                    bin_sizes,
                    tuning,
                );
            }
        }
        last_pos = end;
    }
    for u in cache_offset + first_positive..cache_end {
        let end = bin_cache[u];
        let count = end - last_pos;
        if count >= 2 {
            if count < max_count {
                fallback(&mut v[last_pos..end], rshift);
            } else {
                positive_rec(
                    &mut v[last_pos..end],
                    rshift,
                    fallback,
                    bin_cache,
                    cache_end,
                    bin_sizes,
                    tuning,
                );
            }
        }
        last_pos = end;
    }
}

/// Pipeline level for ranges whose keys are all non-negative: plain
/// ascending bucket layout. The last bucket needs no swap pass (its elements
/// are pinned once every other bucket is full) but still records its end.
fn positive_rec<T, K, R, F>(
    v: &mut [T],
    rshift: &mut R,
    fallback: &mut F,
    bin_cache: &mut Vec<usize>,
    cache_offset: usize,
    bin_sizes: &mut [usize],
    tuning: &Tuning,
) where
    K: Key,
    R: FnMut(&T, u32) -> K,
    F: FnMut(&mut [T], &mut R),
{
    let (min, max) = match is_sorted_or_find_extremes(v, rshift) {
        None => return,
        Some(extremes) => extremes,
    };
    let log_divisor = tuning.log_divisor(v.len(), K::range_bits(min, max));
    let div_min = min.shift_right(log_divisor);
    let div_max = max.shift_right(log_divisor);
    let bin_count = div_max.offset_from(div_min) as usize + 1;
    let cache_end = size_bins(bin_cache, cache_offset, bin_sizes, bin_count);

    for x in v.iter() {
        bin_sizes[rshift(x, log_divisor).offset_from(div_min) as usize] += 1;
    }
    debug_assert_eq!(bin_sizes[..bin_count].iter().sum::<usize>(), v.len());

    {
        let bins = &mut bin_cache[cache_offset..cache_end];
        bins[0] = 0;
        for u in 0..bin_count - 1 {
            bins[u + 1] = bins[u] + bin_sizes[u];
        }
        let mut next_bin_start = 0;
        for u in 0..bin_count - 1 {
            next_bin_start += bin_sizes[u];
            inner_swap_loop(v, bins, u, next_bin_start, rshift, log_divisor, div_min);
        }
        bins[bin_count - 1] = v.len();
    }

    if log_divisor == 0 {
        return;
    }

    let max_count = tuning.min_count(log_divisor);
    let mut last_pos = 0usize;
    for u in cache_offset..cache_end {
        let end = bin_cache[u];
        let count = end - last_pos;
        if count >= 2 {
            if count < max_count {
                fallback(&mut v[last_pos..end], rshift);
            } else {
                positive_rec(
                    &mut v[last_pos..end],
                    rshift,
                    fallback,
                    bin_cache,
                    cache_end,
                    bin_sizes,
                    tuning,
                );
            }
        }
        last_pos = end;
    }
}

/// Pipeline level for ranges whose keys are all negative: buckets are stored
/// in descending index order and the cache window is walked backwards, so
/// larger keys (smaller numeric values, for float-bit keys) come first.
/// Bucket 0 is stored last and needs no swap pass, only its recorded end.
fn negative_rec<T, K, R, F>(
    v: &mut [T],
    rshift: &mut R,
    fallback: &mut F,
    bin_cache: &mut Vec<usize>,
    cache_offset: usize,
    bin_sizes: &mut [usize],
    tuning: &Tuning,
) where
    K: Key,
    R: FnMut(&T, u32) -> K,
    F: FnMut(&mut [T], &mut R),
{
    let (min, max) = match is_sorted_or_find_extremes(v, rshift) {
        None => return,
        Some(extremes) => extremes,
    };
    let log_divisor = tuning.log_divisor(v.len(), K::range_bits(min, max));
    let div_min = min.shift_right(log_divisor);
    let div_max = max.shift_right(log_divisor);
    let bin_count = div_max.offset_from(div_min) as usize + 1;
    let cache_end = size_bins(bin_cache, cache_offset, bin_sizes, bin_count);

    for x in v.iter() {
        bin_sizes[rshift(x, log_divisor).offset_from(div_min) as usize] += 1;
    }
    debug_assert_eq!(bin_sizes[..bin_count].iter().sum::<usize>(), v.len());

    {
        let bins = &mut bin_cache[cache_offset..cache_end];
        bins[bin_count - 1] = 0;
        for ii in (0..bin_count - 1).rev() {
            bins[ii] = bins[ii + 1] + bin_sizes[ii + 1];
        }
        let mut next_bin_start = 0;
        for ii in (1..bin_count).rev() {
            next_bin_start += bin_sizes[ii];
            inner_swap_loop(v, bins, ii, next_bin_start, rshift, log_divisor, div_min);
        }
        bins[0] = v.len();
    }

    if log_divisor == 0 {
        return;
    }

    let max_count = tuning.min_count(log_divisor);
    let mut last_pos = 0usize;
    for ii in (cache_offset..cache_end).rev() {
        let end = bin_cache[ii];
        let count = end - last_pos;
        if count >= 2 {
            if count < max_count {
                fallback(&mut v[last_pos..end], rshift);
            } else {
                negative_rec(
                    &mut v[last_pos..end],
                    rshift,
                    fallback,
                    bin_cache,
                    cache_end,
                    bin_sizes,
                    tuning,
                );
            }
        }
        last_pos = end;
    }
}
