//! Tuning constants and the bucket-granularity math derived from them.
//!
//! Four knobs govern how aggressively a range is split into buckets and when
//! a sub-range is handed to the comparison sort instead; a fifth gates whole
//! calls below a minimum length. The defaults are the classic spreadsort
//! float constants and rarely need changing.

/// Construction-time configuration of the engine.
///
/// Every field is a tuning knob; [`Tuning::default`] gives the standard
/// float-sorting values. The same sort operations available as free functions
/// exist as methods on `Tuning` for configured calls.
///
/// All size knobs are base-2 logarithms. Out-of-range combinations panic at
/// the sort call (see [`Tuning::assert_valid`] conditions in the source); they
/// are caller bugs, not recoverable states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    /// Target mean bucket occupancy, log2. Larger means fewer, fuller buckets
    /// per level.
    pub log_mean_bin_size: u32,
    /// Minimum split granularity, log2: a level aims for at least this many
    /// buckets before recursion pays off.
    pub log_min_split_count: u32,
    /// Finishing size, log2: shorthand for the smallest partition worth
    /// bucketing when the key range is already narrow.
    pub log_finishing_count: u32,
    /// Ceiling on buckets produced per level, log2. The counting array holds
    /// `1 << (max_splits + 1)` slots.
    pub max_splits: u32,
    /// Whole calls shorter than this go straight to the comparison sort.
    pub min_sort_size: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            log_mean_bin_size: 2,
            log_min_split_count: 8,
            log_finishing_count: 4,
            max_splits: 11,
            min_sort_size: 1000,
        }
    }
}

impl Tuning {
    /// The default tuning; identical to [`Tuning::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest bucket-count exponent a zero-divisor (exact) pass may use.
    #[inline]
    pub(crate) fn max_finishing_splits(&self) -> u32 {
        self.max_splits + 1
    }

    /// Counting-array capacity; bounds the bucket count of any level.
    #[inline]
    pub(crate) fn bin_capacity(&self) -> usize {
        1 << self.max_finishing_splits()
    }

    /// Panics on knob combinations the divisor math cannot support.
    pub(crate) fn assert_valid(&self) {
        assert!(
            self.max_splits > 1 && self.max_splits < 31,
            "max_splits must be in 2..31, got {}",
            self.max_splits
        );
        assert!(
            self.log_min_split_count > 0 && self.log_min_split_count <= self.max_splits,
            "log_min_split_count must be in 1..=max_splits, got {}",
            self.log_min_split_count
        );
        assert!(
            self.log_mean_bin_size <= 31,
            "log_mean_bin_size must be at most 31, got {}",
            self.log_mean_bin_size
        );
        assert!(
            self.log_finishing_count <= 63,
            "log_finishing_count must be at most 63, got {}",
            self.log_finishing_count
        );
    }

    /// Number of low-order key bits to discard at this level, given the local
    /// element count and the bit width of the local `max - min` key range.
    ///
    /// Zero means a single counting pass resolves the level exactly. A
    /// non-zero result always leaves at least two distinct shifted values
    /// (strict progress) and never reaches the key width (shift validity),
    /// while capping the bucket count at `2^max_splits` per level.
    pub(crate) fn log_divisor(&self, count: usize, log_range: u32) -> u32 {
        let raw = log_range as i32 - rough_log2(count) as i32;
        // One exact pass, if it fits the counting array.
        if raw <= 0 && log_range <= self.max_finishing_splits() {
            return 0;
        }
        let mut log_divisor = raw + self.log_mean_bin_size as i32;
        if log_divisor < 0 {
            log_divisor = 0;
        }
        if log_divisor >= log_range as i32 {
            log_divisor = log_range as i32 - 1;
        }
        if log_range as i32 - log_divisor > self.max_splits as i32 {
            log_divisor = (log_range - self.max_splits) as i32;
        }
        log_divisor as u32
    }

    /// Finishing threshold: partitions smaller than this are delegated to the
    /// comparison sort instead of recursed (a function of the remaining key
    /// range, shrinking as ranges narrow).
    pub(crate) fn min_count(&self, log_range: u32) -> usize {
        let min_size = self.log_mean_bin_size + self.log_min_split_count;
        if self.log_finishing_count < min_size
            && log_range <= min_size
            && log_range <= self.max_splits
        {
            let bits = log_range.min(self.log_finishing_count);
            return 1 << bits.min(usize::BITS - 1);
        }
        let base_iterations = self.max_splits - self.log_min_split_count;
        let base_range = ((base_iterations + 1) * (self.max_splits + self.log_min_split_count))
            / 2
            + self.log_mean_bin_size;
        if log_range < base_range {
            let mut result = self.log_min_split_count;
            let mut offset = min_size;
            while offset < log_range {
                result += 1;
                offset += result;
            }
            1 << (result + self.log_mean_bin_size).min(usize::BITS - 1)
        } else {
            let remainder = log_range - base_range;
            let bit_length =
                (self.max_splits - 1 + remainder) / self.max_splits + base_iterations + min_size;
            1 << bit_length.min(usize::BITS - 1)
        }
    }
}

/// Bit length of `x`: the smallest shift that reduces `x` to zero.
#[inline]
pub(crate) fn rough_log2(x: usize) -> u32 {
    usize::BITS - x.leading_zeros()
}
