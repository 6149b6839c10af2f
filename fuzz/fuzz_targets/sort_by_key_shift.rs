#![no_main]

use libfuzzer_sys::fuzz_target;

use spreadsort_fuzz::util;

// The raw form of the float-bits key, written out without the Float trait.
fuzz_target!(|data: &[u8]| {
    let mut v = util::as_f32s(data);
    let mut expected = v.clone();

    util::engine_tuning().sort_by_key_shift(&mut v, |x: &f32, shift| (x.to_bits() as i32) >> shift);
    expected.sort_unstable_by(f32::total_cmp);

    assert!(v
        .iter()
        .map(|x| x.to_bits())
        .eq(expected.iter().map(|x| x.to_bits())));
});
