/// Single-pass 3-point moving average. Endpoints pass through; inputs
/// shorter than three samples are returned unchanged.
pub fn smooth(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 3 {
        return values.to_vec();
    }

    let mut out = Vec::with_capacity(n);
    out.push(values[0]);
    out.extend(values.windows(3).map(|w| (w[0] + w[1] + w[2]) / 3.0));
    out.push(values[n - 1]);
    out
}
