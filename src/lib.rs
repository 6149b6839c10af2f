//! In-place hybrid radix sorting for slices of floats and other types with
//! fixed-width integer keys.
//!
//! The algorithm is a spreadsort: it splits the value range into power-of-two
//! buckets by shifting the most significant key bits, permutes elements into
//! their buckets with cycle-following swaps (no scratch buffer), and then per
//! bucket either recurses with a finer divisor or hands the bucket to a
//! comparison sort once it is small enough that bucketing stops paying off.
//! Already-sorted input is detected in one scan and returned untouched.
//!
//! Floats are ordered by [`f32::total_cmp`]/[`f64::total_cmp`], the IEEE 754
//! total order: negative NaNs first, then `-inf` through `+inf`, then
//! positive NaNs, with `-0.0 < +0.0`. Every input, NaNs included, produces
//! the same result as `slice::sort_unstable_by(f64::total_cmp)`.
//!
//! The sort is not stable: elements that compare equal may end up in any
//! relative order.
//!
//! ```
//! let mut v = vec![3.0_f32, -1.0, -2.5, 0.5, -0.5];
//! spreadsort::sort(&mut v);
//! assert_eq!(v, [-2.5, -1.0, -0.5, 0.5, 3.0]);
//! ```
//!
//! Beyond floats, [`sort_by_key`] buckets any type through a projection to a
//! primitive integer key, [`sort_by_key_shift`] additionally lets the caller
//! fuse the bucket shift into the projection, and [`sort_by`] is the plain
//! comparison escape hatch for types without a fixed-width key. The division
//! between bucketing and comparison work is controlled by [`Tuning`].

#![forbid(unsafe_code)]

mod key;
mod spread;
mod tuning;

pub use key::{Float, Key};
pub use tuning::Tuning;

use core::cmp::Ordering;

use key::sign_corrected_cmp;

/// Sorts floats in place in [`f32::total_cmp`]/[`f64::total_cmp`] order,
/// using the default [`Tuning`].
pub fn sort<T: Float>(v: &mut [T]) {
    Tuning::new().sort(v);
}

/// Sorts `v` in place by a fixed-width integer key, using the default
/// [`Tuning`].
///
/// Keys order as documented on [`Key`]: plain ascending for unsigned types,
/// float-bit semantics for signed ones (negative keys first, and among
/// themselves in descending key order, the layout of a bit-cast IEEE float).
/// Elements with equal keys may end up in any order.
pub fn sort_by_key<T, K: Key>(v: &mut [T], key: impl FnMut(&T) -> K) {
    Tuning::new().sort_by_key(v, key);
}

/// Sorts `v` in place by a shifted key projection, using the default
/// [`Tuning`]. See [`Tuning::sort_by_key_shift`].
pub fn sort_by_key_shift<T, K: Key>(v: &mut [T], rshift: impl FnMut(&T, u32) -> K) {
    Tuning::new().sort_by_key_shift(v, rshift);
}

/// Sorts `v` in place by a shifted key projection with a caller-supplied
/// comparator, using the default [`Tuning`]. See
/// [`Tuning::sort_by_key_shift_cmp`].
pub fn sort_by_key_shift_cmp<T, K: Key>(
    v: &mut [T],
    rshift: impl FnMut(&T, u32) -> K,
    compare: impl FnMut(&T, &T) -> Ordering,
) {
    Tuning::new().sort_by_key_shift_cmp(v, rshift, compare);
}

/// Sorts `v` in place by a comparator alone, without bucketing.
///
/// This is the same comparison sort the bucketing entry points delegate
/// small sub-ranges to. Use it for types with no fixed-width key worth
/// projecting, for example `u128` or strings.
pub fn sort_by<T>(v: &mut [T], compare: impl FnMut(&T, &T) -> Ordering) {
    v.sort_unstable_by(compare);
}

impl Tuning {
    /// Sorts floats in place in total order under this tuning.
    ///
    /// # Panics
    ///
    /// Panics if a tuning field is outside its documented range.
    pub fn sort<T: Float>(&self, v: &mut [T]) {
        spread::spread_sort(
            v,
            |x: &T, shift| x.to_key().shift_right(shift),
            |sub: &mut [T], _rshift: &mut _| sub.sort_unstable_by(Float::total_order),
            self,
        );
    }

    /// Sorts `v` in place by a fixed-width integer key under this tuning.
    ///
    /// `key` is called whenever the engine needs an element's key; it should
    /// be cheap and must return the same key for the same element every
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if a tuning field is outside its documented range.
    pub fn sort_by_key<T, K: Key>(&self, v: &mut [T], mut key: impl FnMut(&T) -> K) {
        self.sort_by_key_shift(v, move |x, shift| key(x).shift_right(shift));
    }

    /// Sorts `v` in place by a shifted key projection under this tuning.
    ///
    /// `rshift(x, n)` must equal `rshift(x, 0) >> n` with an arithmetic
    /// shift for signed keys. Spelling the shift out lets a caller whose key
    /// lives in the high bits of a wider value skip materializing the full
    /// key, which is where this entry point earns its keep over
    /// [`Tuning::sort_by_key`].
    ///
    /// # Panics
    ///
    /// Panics if a tuning field is outside its documented range.
    pub fn sort_by_key_shift<T, K: Key>(&self, v: &mut [T], rshift: impl FnMut(&T, u32) -> K) {
        spread::spread_sort(
            v,
            rshift,
            |sub: &mut [T], rs: &mut _| {
                sub.sort_unstable_by(|a, b| sign_corrected_cmp(rs(a, 0), rs(b, 0)));
            },
            self,
        );
    }

    /// Sorts `v` in place by a shifted key projection, delegating small
    /// sub-ranges to `compare` instead of the key order.
    ///
    /// `compare` must agree with the key projection: whenever the full keys
    /// of two elements differ, `compare` must return how the keys order under
    /// the [`Key`] semantics (ascending, except that signed keys place
    /// negatives first and in descending key order among themselves), and
    /// elements with equal keys must compare `Equal`. A comparator that
    /// disagrees with the keys leaves the slice in an unspecified permutation
    /// of its input.
    ///
    /// # Panics
    ///
    /// Panics if a tuning field is outside its documented range.
    pub fn sort_by_key_shift_cmp<T, K: Key>(
        &self,
        v: &mut [T],
        rshift: impl FnMut(&T, u32) -> K,
        mut compare: impl FnMut(&T, &T) -> Ordering,
    ) {
        spread::spread_sort(
            v,
            rshift,
            move |sub: &mut [T], _rshift: &mut _| sub.sort_unstable_by(&mut compare),
            self,
        );
    }
}
