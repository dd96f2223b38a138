//! Small statistics helpers shared by the transforms, the analyzer and the projector.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (mean of squared deviations, square-rooted).
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// `(min, max)` of a slice, `None` when empty.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// The last `limit` samples of `values`; the whole slice when `limit` is
/// `None` or at least the slice length.
pub fn limit_recent(values: &[f64], limit: Option<usize>) -> &[f64] {
    match limit {
        Some(n) if n < values.len() => &values[values.len() - n..],
        _ => values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_dev() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&v), Some(5.0));
        assert_eq!(population_std_dev(&v), Some(2.0));
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std_dev(&[]), None);
    }

    #[test]
    fn min_max_of_slice() {
        assert_eq!(min_max(&[3.0, -1.0, 8.0]), Some((-1.0, 8.0)));
        assert_eq!(min_max(&[]), None);
    }

    #[test]
    fn limit_recent_keeps_tail() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(limit_recent(&v, Some(2)), &[3.0, 4.0]);
        assert_eq!(limit_recent(&v, Some(10)), &v);
        assert_eq!(limit_recent(&v, None), &v);
        assert!(limit_recent(&v, Some(0)).is_empty());
    }
}
