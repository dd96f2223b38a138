/// First derivative per sample step.
///
/// Same length as the input: forward difference at index 0, backward
/// difference at the last index, central difference `(x[i+1] - x[i-1]) / 2`
/// in between. Fewer than two samples yields an empty vector.
pub fn derivative(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n);
    out.push(values[1] - values[0]);
    out.extend(values.windows(3).map(|w| (w[2] - w[0]) / 2.0));
    out.push(values[n - 1] - values[n - 2]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_central_backward() {
        assert_eq!(derivative(&[1.0, 2.0, 4.0, 7.0]), vec![1.0, 1.5, 2.5, 3.0]);
    }

    #[test]
    fn two_samples_use_one_sided_differences() {
        assert_eq!(derivative(&[3.0, 5.0]), vec![2.0, 2.0]);
    }

    #[test]
    fn too_short_is_empty() {
        assert!(derivative(&[5.0]).is_empty());
        assert!(derivative(&[]).is_empty());
    }
}
