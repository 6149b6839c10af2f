#![no_main]

use libfuzzer_sys::fuzz_target;

use spreadsort_fuzz::util;

fuzz_target!(|data: &[u8]| {
    let mut v = util::as_f32s(data);
    let mut expected = v.clone();

    util::engine_tuning().sort(&mut v);
    expected.sort_unstable_by(f32::total_cmp);

    assert!(v
        .iter()
        .map(|x| x.to_bits())
        .eq(expected.iter().map(|x| x.to_bits())));
});
