use spreadsort::Tuning;

pub fn as_f64s(data: &[u8]) -> Vec<f64> {
    data.chunks_exact(8)
        .map(|chunk| f64::from_le_bytes(chunk.try_into().unwrap()))
        .collect()
}

pub fn as_f32s(data: &[u8]) -> Vec<f32> {
    data.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
        .collect()
}

/// Default knobs with the length gate lowered, so that even the short inputs
/// the fuzzer favors run the bucketing engine and not just the fallback.
pub fn engine_tuning() -> Tuning {
    Tuning {
        min_sort_size: 2,
        ..Tuning::new()
    }
}
