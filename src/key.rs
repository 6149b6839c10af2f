//! Key projections.
//!
//! The engine buckets by an integer key derived from each element, either via
//! the built-in same-width bit-cast for IEEE floats ([`Float`]) or a
//! caller-supplied extraction function returning any [`Key`] type. Both traits
//! are sealed; the set of supported widths is fixed by the engine.

use core::cmp::Ordering;

/// Integer types usable as the projected sort key ("witness" type).
///
/// Implemented for the signed and unsigned integers up to 64 bits. Wider
/// projections cannot be bucketed; callers with such keys should use
/// [`sort_by`](crate::sort_by) instead.
///
/// Keys are interpreted with IEEE float-bit semantics: elements whose keys are
/// negative sort before those with non-negative keys, and among themselves in
/// *descending* key order, matching the layout of a sign-magnitude float that
/// was bit-cast to a two's-complement integer. Unsigned key types have no
/// negative values, so for them the effective order is plain ascending key
/// order.
pub trait Key: Copy + Ord + private::Sealed {
    #[doc(hidden)]
    const BITS: u32;

    #[doc(hidden)]
    const ZERO: Self;

    /// Right-shift, arithmetic for signed types.
    #[doc(hidden)]
    fn shift_right(self, bits: u32) -> Self;

    #[doc(hidden)]
    fn is_negative(self) -> bool;

    /// Bit length of `max - min`, evaluated in the unsigned domain.
    #[doc(hidden)]
    fn range_bits(min: Self, max: Self) -> u32;

    /// `self - origin` in the unsigned domain, widened to `u64`.
    #[doc(hidden)]
    fn offset_from(self, origin: Self) -> u64;
}

macro_rules! impl_key {
    ($($t:ty => $u:ty, $is_negative:expr;)*) => ($(
        impl Key for $t {
            const BITS: u32 = <$t>::BITS;
            const ZERO: Self = 0;

            #[inline(always)]
            fn shift_right(self, bits: u32) -> Self {
                self >> bits
            }

            #[inline(always)]
            fn is_negative(self) -> bool {
                $is_negative(self)
            }

            #[inline(always)]
            fn range_bits(min: Self, max: Self) -> u32 {
                let diff = (max as $u).wrapping_sub(min as $u);
                <$u>::BITS - diff.leading_zeros()
            }

            #[inline(always)]
            fn offset_from(self, origin: Self) -> u64 {
                (self as $u).wrapping_sub(origin as $u) as u64
            }
        }
    )*)
}

impl_key! {
    i8 => u8, |v: i8| v < 0;
    i16 => u16, |v: i16| v < 0;
    i32 => u32, |v: i32| v < 0;
    i64 => u64, |v: i64| v < 0;
    u8 => u8, |_| false;
    u16 => u16, |_| false;
    u32 => u32, |_| false;
    u64 => u64, |_| false;
}

/// Floating-point types with a built-in same-width integer projection.
///
/// Implemented for `f32` and `f64`. The projection is the raw bit pattern
/// reinterpreted as a signed integer of the same width, which orders exactly
/// like IEEE-754 `totalOrder` once the engine's sign correction is applied.
pub trait Float: Copy + private::Sealed {
    #[doc(hidden)]
    type Key: Key;

    /// Defined-behavior bit reinterpretation of the value.
    #[doc(hidden)]
    fn to_key(self) -> Self::Key;

    /// IEEE-754 `totalOrder`, the effective order of the built-in path.
    #[doc(hidden)]
    fn total_order(&self, other: &Self) -> Ordering;
}

impl Float for f32 {
    type Key = i32;

    #[inline(always)]
    fn to_key(self) -> i32 {
        self.to_bits() as i32
    }

    #[inline(always)]
    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Float for f64 {
    type Key = i64;

    #[inline(always)]
    fn to_key(self) -> i64 {
        self.to_bits() as i64
    }

    #[inline(always)]
    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// The total order induced by sign-corrected keys: negative keys first in
/// descending key order, then non-negative keys ascending. For keys bit-cast
/// from floats this is numeric order (`totalOrder`); it is the order every
/// bucketing pass of the engine produces.
#[inline]
pub(crate) fn sign_corrected_cmp<K: Key>(a: K, b: K) -> Ordering {
    match (a.is_negative(), b.is_negative()) {
        (true, true) => b.cmp(&a),
        (false, false) => a.cmp(&b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
    }
}

mod private {
    /// Seals [`Key`](super::Key) and [`Float`](super::Float) against
    /// downstream implementations.
    pub trait Sealed {}

    macro_rules! sealed_impl { ($($t:ty)*) => ($(
        impl Sealed for $t {}
    )*) }

    sealed_impl! {
        i8 i16 i32 i64
        u8 u16 u32 u64
        f32 f64
    }
}
