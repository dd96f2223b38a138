/// Windowed-average downsampling.
///
/// Splits `values` into consecutive chunks of `window` samples (the last
/// chunk may be shorter) and emits the mean of each chunk, so the output
/// has `ceil(len / window)` elements. A window of 0 or 1 returns a copy of
/// the input.
pub fn aggregate(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.is_empty() {
        return values.to_vec();
    }
    values
        .chunks(window)
        .map(|chunk| chunk.iter().sum::<f64>() / chunk.len() as f64)
        .collect()
}
