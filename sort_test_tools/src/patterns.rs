use std::env;
use std::str::FromStr;
use std::sync::Mutex;

use rand::prelude::*;

use zipf::ZipfDistribution;

/// Provides a set of patterns useful for testing and benchmarking sorting
/// algorithms. Limited to f64 values; f32 inputs are derived by casting.

// --- Public ---

pub fn random(len: usize) -> Vec<f64> {
    //     .
    // : . : :
    // :.:::.::

    // Uniform over bit patterns, not values. Covers NaNs with every payload,
    // both infinities, subnormals and both zeros.
    let mut rng = new_rng();

    (0..len).map(|_| f64::from_bits(rng.gen::<u64>())).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<f64>
where
    R: Into<rand::distributions::Uniform<f64>>,
{
    // :.:.:.::
    let mut rng = new_rng();

    // Abstracting over ranges in Rust :(
    let dist: rand::distributions::Uniform<f64> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<f64> {
    // https://en.wikipedia.org/wiki/Zipf's_law
    let mut rng = new_rng();

    let dist = ZipfDistribution::new(len, exponent).unwrap();

    (0..len).map(|_| dist.sample(&mut rng) as f64).collect()
}

pub fn random_subnormal(len: usize) -> Vec<f64> {
    // Zero exponent with a random mantissa and sign: subnormals of either
    // sign, plus the occasional -0.0 and +0.0.
    let mut rng = new_rng();

    (0..len)
        .map(|_| f64::from_bits(rng.gen::<u64>() & 0x800F_FFFF_FFFF_FFFF))
        .collect()
}

pub fn random_with_nans(len: usize, nan_ratio: f64) -> Vec<f64> {
    // Random finite-ish values with roughly `nan_ratio` of NaNs mixed in,
    // random payloads and signs.
    let mut rng = new_rng();

    (0..len)
        .map(|_| {
            if rng.gen_bool(nan_ratio) {
                let payload = (rng.gen::<u64>() & 0x000F_FFFF_FFFF_FFFF) | 1;
                let sign = rng.gen::<u64>() & (1 << 63);
                f64::from_bits(0x7FF0_0000_0000_0000 | sign | payload)
            } else {
                f64::from_bits(rng.gen::<u64>())
            }
        })
        .collect()
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<f64> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    //  ^      ^
    //  |      |
    // sorted  |
    //     unsorted

    // Simulate pre-existing sorted slice, where len - sorted_percent are the
    // new unsorted values and part of the overall distribution.
    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;

    v[0..sorted_len].sort_unstable_by(f64::total_cmp);

    v
}

pub fn all_equal(len: usize) -> Vec<f64> {
    // ......
    // ::::::

    (0..len).map(|_| 66.0).collect::<Vec<_>>()
}

pub fn ascending(len: usize) -> Vec<f64> {
    //     .:
    //   .:::
    // .:::::

    (0..len).map(|x| x as f64).collect::<Vec<_>>()
}

pub fn descending(len: usize) -> Vec<f64> {
    // :.
    // :::.
    // :::::.

    (0..len).rev().map(|x| x as f64).collect::<Vec<_>>()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<f64> {
    //   .:  .:
    // .:::.:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);

    for chunk in vals.chunks_mut(chunks_size) {
        chunk.sort_unstable_by(f64::total_cmp);
    }

    vals
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<f64> {
    // :.  :.
    // :::.:::.

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);

    for chunk in vals.chunks_mut(chunks_size) {
        chunk.sort_unstable_by(|a, b| b.total_cmp(a));
    }

    vals
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<f64> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);
    let saw_directions = random_directions((len / chunks_size) + 1);

    for (i, chunk) in vals.chunks_mut(chunks_size).enumerate() {
        if saw_directions[i] {
            chunk.sort_unstable_by(f64::total_cmp);
        } else {
            chunk.sort_unstable_by(|a, b| b.total_cmp(a));
        }
    }

    vals
}

pub fn saw_mixed_range(len: usize, range: std::ops::Range<usize>) -> Vec<f64> {
    //     :.
    // :.  :::.    .::.      .:
    // :::.:::::..::::::..:.:::

    // ascending and descending randomly picked, with length in `range`.

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);

    let max_chunks = len / range.start;
    let saw_directions = random_directions(max_chunks + 1);
    let chunk_sizes = random_lengths(max_chunks + 1, range);

    let mut i = 0;
    let mut l = 0;
    while l < len {
        let chunk_size = chunk_sizes[i];
        let chunk_end = std::cmp::min(l + chunk_size, len);
        let chunk = &mut vals[l..chunk_end];

        if saw_directions[i] {
            chunk.sort_unstable_by(f64::total_cmp);
        } else {
            chunk.sort_unstable_by(|a, b| b.total_cmp(a));
        }

        i += 1;
        l += chunk_size;
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<f64> {
    //   .:.
    // .:::::.

    let mut vals = random(len);

    let first_half = &mut vals[0..(len / 2)];
    first_half.sort_unstable_by(f64::total_cmp);

    let second_half = &mut vals[(len / 2)..len];
    second_half.sort_unstable_by(|a, b| b.total_cmp(a));

    vals
}

/// Overwrites the default behavior so that each call to a random derived
/// pattern yields new random values.
///
/// By default `patterns::random(4)` will yield the same values per process
/// invocation. For benchmarks it's advised to call this function.
pub fn use_random_seed_each_time() {
    let (seed_type, _) = get_or_init_seed_type_and_value();
    if seed_type == SeedType::ExternalOverride {
        panic!("Using use_random_seed_each_time conflicts with the external seed override.");
    }

    *SEED_TYPE_AND_VALUE.lock().unwrap() = Some((SeedType::RandomEachTime, 0));
}

pub fn random_init_seed() -> u64 {
    get_or_init_seed_type_and_value().1
}

// --- Private ---

#[derive(Copy, Clone, PartialEq, Eq)]
enum SeedType {
    RandomEachTime,
    RandomOncePerProcess,
    ExternalOverride,
}

static SEED_TYPE_AND_VALUE: Mutex<Option<(SeedType, u64)>> = Mutex::new(None);

fn get_or_init_seed_type_and_value() -> (SeedType, u64) {
    let (seed_type, seed_val) = *SEED_TYPE_AND_VALUE.lock().unwrap().get_or_insert_with(|| {
        if let Some(override_seed) = env::var("OVERRIDE_SEED")
            .ok()
            .map(|seed| u64::from_str(&seed).unwrap())
        {
            (SeedType::ExternalOverride, override_seed)
        } else {
            let per_process_seed = thread_rng().gen();
            (SeedType::RandomOncePerProcess, per_process_seed)
        }
    });

    if seed_type == SeedType::RandomEachTime {
        (SeedType::RandomEachTime, thread_rng().gen())
    } else {
        (seed_type, seed_val)
    }
}

fn new_rng() -> StdRng {
    // Seeded rng, so failures are repeatable via OVERRIDE_SEED.
    rand::SeedableRng::seed_from_u64(random_init_seed())
}

fn random_directions(len: usize) -> Vec<bool> {
    let mut rng = new_rng();

    (0..len).map(|_| rng.gen::<bool>()).collect()
}

fn random_lengths(len: usize, range: std::ops::Range<usize>) -> Vec<usize> {
    let mut rng = new_rng();
    let dist = rand::distributions::Uniform::from(range);

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}
