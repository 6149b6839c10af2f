use std::cmp::Ordering;

/// Interface the test suite drives a sort implementation through.
///
/// The float entry points must order by `total_cmp`. `sort_by_f64_key` sorts
/// arbitrary elements by an f64 sort key with a comparator that must be
/// consistent with that key; the suite uses it to observe comparator calls
/// and to exercise panic and order-violation behavior.
pub trait Sort {
    fn name() -> String;

    fn sort_f32(v: &mut [f32]);

    fn sort_f64(v: &mut [f64]);

    fn sort_by_f64_key<T, K, C>(v: &mut [T], key: K, compare: C)
    where
        K: FnMut(&T) -> f64,
        C: FnMut(&T, &T) -> Ordering;
}

pub mod patterns;
