use std::fmt;

use crate::transform::numeric::{mean, min_max, population_std_dev};
use crate::transform::{aggregate, derivative};

/// Mean derivative magnitude below which a series counts as flat.
const STABLE_THRESHOLD: f64 = 0.001;

/// Peak/valley indices listed in the text report before truncating.
const MAX_LISTED_EXTREMA: usize = 10;

// ---------------------------------------------------------------------------
// Classifications
// ---------------------------------------------------------------------------

/// Overall direction of a series, from the mean of its derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    /// Fewer than two processed samples, so no derivative exists.
    NoData,
}

impl Trend {
    pub fn classify(derivative_mean: Option<f64>) -> Self {
        match derivative_mean {
            None => Trend::NoData,
            Some(m) if m.abs() < STABLE_THRESHOLD => Trend::Stable,
            Some(m) if m > 0.0 => Trend::Increasing,
            Some(_) => Trend::Decreasing,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => write!(f, "increasing"),
            Trend::Decreasing => write!(f, "decreasing"),
            Trend::Stable => write!(f, "stable"),
            Trend::NoData => write!(f, "no trend data"),
        }
    }
}

/// Qualitative noise reduction implied by the aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseReduction {
    Raw,
    Minimal,
    Light,
    Moderate,
    Heavy,
    Custom(usize),
}

impl NoiseReduction {
    pub fn from_window(window: usize) -> Self {
        match window {
            1 => NoiseReduction::Raw,
            2 => NoiseReduction::Minimal,
            5 => NoiseReduction::Light,
            10 => NoiseReduction::Moderate,
            25 => NoiseReduction::Heavy,
            other => NoiseReduction::Custom(other),
        }
    }
}

impl fmt::Display for NoiseReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseReduction::Raw => write!(f, "none (raw data)"),
            NoiseReduction::Minimal => write!(f, "minimal (2-sample average)"),
            NoiseReduction::Light => write!(f, "light (5-sample average)"),
            NoiseReduction::Moderate => write!(f, "moderate (10-sample average)"),
            NoiseReduction::Heavy => write!(f, "heavy (25-sample average)"),
            NoiseReduction::Custom(w) => write!(f, "custom ({w}-sample average)"),
        }
    }
}

/// How strongly aggregation shortened the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingEffect {
    NoAggregation,
    Light,
    Moderate,
    Strong,
    VeryStrong,
}

impl SmoothingEffect {
    /// Equal lengths are checked first, so `NoAggregation` wins over `Light`.
    pub fn classify(original_len: usize, processed_len: usize) -> Self {
        if processed_len == original_len {
            return SmoothingEffect::NoAggregation;
        }
        let ratio = processed_len as f64 / original_len as f64;
        if ratio > 0.8 {
            SmoothingEffect::Light
        } else if ratio > 0.5 {
            SmoothingEffect::Moderate
        } else if ratio > 0.2 {
            SmoothingEffect::Strong
        } else {
            SmoothingEffect::VeryStrong
        }
    }
}

impl fmt::Display for SmoothingEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmoothingEffect::NoAggregation => write!(f, "no aggregation applied"),
            SmoothingEffect::Light => write!(f, "light smoothing"),
            SmoothingEffect::Moderate => write!(f, "moderate smoothing"),
            SmoothingEffect::Strong => write!(f, "strong smoothing"),
            SmoothingEffect::VeryStrong => write!(f, "very strong smoothing"),
        }
    }
}

// ---------------------------------------------------------------------------
// Extrema
// ---------------------------------------------------------------------------

/// Local maxima and minima of a series. Both neighbours must compare
/// strictly; the first and last index are never reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtremaSet {
    pub peaks: Vec<usize>,
    pub valleys: Vec<usize>,
}

impl ExtremaSet {
    pub fn find(values: &[f64]) -> Self {
        let mut set = ExtremaSet::default();
        for (offset, w) in values.windows(3).enumerate() {
            let i = offset + 1;
            if w[1] > w[0] && w[1] > w[2] {
                set.peaks.push(i);
            } else if w[1] < w[0] && w[1] < w[2] {
                set.valleys.push(i);
            }
        }
        set
    }
}

// ---------------------------------------------------------------------------
// AnalysisReport
// ---------------------------------------------------------------------------

/// Statistics for one column after aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub original_len: usize,
    pub processed_len: usize,
    pub window: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// `None` when the processed series has fewer than two samples.
    pub derivative_mean: Option<f64>,
    pub derivative_std_dev: Option<f64>,
    pub extrema: ExtremaSet,
    pub trend: Trend,
    pub noise_reduction: NoiseReduction,
    pub smoothing: SmoothingEffect,
}

/// Aggregate `original` with `window` and describe the result.
///
/// Returns `None` for an empty input, since no statistic is defined there.
pub fn analyze(original: &[f64], window: usize) -> Option<AnalysisReport> {
    if original.is_empty() {
        return None;
    }

    let processed = aggregate(original, window);
    let (min, max) = min_max(&processed)?;
    let mean_value = mean(&processed)?;
    let std_dev = population_std_dev(&processed)?;

    let deriv = derivative(&processed);
    let derivative_mean = mean(&deriv);

    Some(AnalysisReport {
        original_len: original.len(),
        processed_len: processed.len(),
        window,
        min,
        max,
        mean: mean_value,
        std_dev,
        derivative_mean,
        derivative_std_dev: population_std_dev(&deriv),
        extrema: ExtremaSet::find(&processed),
        trend: Trend::classify(derivative_mean),
        noise_reduction: NoiseReduction::from_window(window),
        smoothing: SmoothingEffect::classify(original.len(), processed.len()),
    })
}

impl AnalysisReport {
    /// Multi-line text block for the analysis panel.
    pub fn report(&self, label: &str) -> String {
        let derivative = match (self.derivative_mean, self.derivative_std_dev) {
            (Some(m), Some(s)) => format!("{m:.4} (std {s:.4})"),
            _ => "n/a".to_string(),
        };
        format!(
            "{label}:\n  Samples: {} -> {} (window {})\n  Min: {:.3}  Max: {:.3}\n  Mean: {:.3}  Std Dev: {:.3}\n  Rate of change: {derivative}\n  Trend: {}\n  Peaks: {}\n  Valleys: {}\n  Noise reduction: {}\n  Effect: {}\n",
            self.original_len,
            self.processed_len,
            self.window,
            self.min,
            self.max,
            self.mean,
            self.std_dev,
            self.trend,
            list_indices(&self.extrema.peaks),
            list_indices(&self.extrema.valleys),
            self.noise_reduction,
            self.smoothing,
        )
    }
}

fn list_indices(indices: &[usize]) -> String {
    if indices.is_empty() {
        return "none".to_string();
    }
    let shown: Vec<String> = indices
        .iter()
        .take(MAX_LISTED_EXTREMA)
        .map(|i| i.to_string())
        .collect();
    let more = indices.len().saturating_sub(MAX_LISTED_EXTREMA);
    if more > 0 {
        format!("{} at [{}, … +{more}]", indices.len(), shown.join(", "))
    } else {
        format!("{} at [{}]", indices.len(), shown.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extrema_are_strict_and_interior() {
        let set = ExtremaSet::find(&[1.0, 3.0, 2.0, 5.0, 4.0]);
        assert_eq!(set.peaks, vec![1, 3]);
        assert_eq!(set.valleys, vec![2]);
    }

    #[test]
    fn plateaus_and_endpoints_are_not_extrema() {
        let set = ExtremaSet::find(&[9.0, 1.0, 3.0, 3.0, 1.0, 9.0]);
        assert!(set.peaks.is_empty());
        assert_eq!(set.valleys, vec![1, 4]);
        assert_eq!(ExtremaSet::find(&[1.0, 2.0]), ExtremaSet::default());
    }

    #[test]
    fn trend_classification() {
        assert_eq!(Trend::classify(Some(0.5)), Trend::Increasing);
        assert_eq!(Trend::classify(Some(-0.5)), Trend::Decreasing);
        assert_eq!(Trend::classify(Some(0.0009)), Trend::Stable);
        assert_eq!(Trend::classify(Some(-0.0009)), Trend::Stable);
        assert_eq!(Trend::classify(None), Trend::NoData);
        assert_eq!(Trend::NoData.to_string(), "no trend data");
    }

    #[test]
    fn noise_reduction_labels() {
        assert_eq!(NoiseReduction::from_window(1), NoiseReduction::Raw);
        assert_eq!(NoiseReduction::from_window(25), NoiseReduction::Heavy);
        assert_eq!(NoiseReduction::from_window(7), NoiseReduction::Custom(7));
        assert!(NoiseReduction::Custom(7).to_string().starts_with("custom"));
    }

    #[test]
    fn smoothing_effect_bands() {
        assert_eq!(SmoothingEffect::classify(100, 100), SmoothingEffect::NoAggregation);
        assert_eq!(SmoothingEffect::classify(100, 90), SmoothingEffect::Light);
        assert_eq!(SmoothingEffect::classify(100, 80), SmoothingEffect::Moderate);
        assert_eq!(SmoothingEffect::classify(100, 50), SmoothingEffect::Strong);
        assert_eq!(SmoothingEffect::classify(100, 20), SmoothingEffect::VeryStrong);
        assert_eq!(SmoothingEffect::classify(100, 4), SmoothingEffect::VeryStrong);
    }

    #[test]
    fn analyze_aggregated_ramp() {
        let original: Vec<f64> = (0..10).map(f64::from).collect();
        let report = analyze(&original, 2).unwrap();

        // [0.5, 2.5, 4.5, 6.5, 8.5]
        assert_eq!(report.processed_len, 5);
        assert_eq!(report.min, 0.5);
        assert_eq!(report.max, 8.5);
        assert_eq!(report.mean, 4.5);
        assert!((report.std_dev - 8.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(report.derivative_mean, Some(2.0));
        assert_eq!(report.derivative_std_dev, Some(0.0));
        assert_eq!(report.trend, Trend::Increasing);
        assert_eq!(report.noise_reduction, NoiseReduction::Minimal);
        assert_eq!(report.smoothing, SmoothingEffect::Strong);
        assert!(report.extrema.peaks.is_empty());
    }

    #[test]
    fn analyze_without_aggregation() {
        let report = analyze(&[1.0, 3.0, 2.0, 5.0, 4.0], 1).unwrap();
        assert_eq!(report.smoothing, SmoothingEffect::NoAggregation);
        assert_eq!(report.extrema.peaks, vec![1, 3]);
        assert_eq!(report.extrema.valleys, vec![2]);
    }

    #[test]
    fn single_processed_sample_has_no_trend() {
        let report = analyze(&[4.0, 6.0], 5).unwrap();
        assert_eq!(report.processed_len, 1);
        assert_eq!(report.mean, 5.0);
        assert_eq!(report.derivative_mean, None);
        assert_eq!(report.trend, Trend::NoData);
        assert!(report.report("x").contains("Rate of change: n/a"));
    }

    #[test]
    fn flat_series_is_stable() {
        let report = analyze(&[2.0; 8], 1).unwrap();
        assert_eq!(report.trend, Trend::Stable);
        assert_eq!(report.std_dev, 0.0);
    }

    #[test]
    fn empty_input_yields_no_report() {
        assert!(analyze(&[], 1).is_none());
    }

    #[test]
    fn long_extrema_lists_are_truncated() {
        let zigzag: Vec<f64> = (0..40).map(|i| (i % 2) as f64).collect();
        let text = analyze(&zigzag, 1).unwrap().report("zz");
        assert!(text.contains("Peaks: 19 at [1, 3, 5"));
        assert!(text.contains("+9]"));
    }
}
