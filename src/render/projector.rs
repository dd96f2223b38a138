use eframe::egui::{Pos2, Rect, pos2};

use crate::config::Margins;
use crate::transform::numeric::min_max;

/// Bounds applied to the scaled, normalised value. Values above 1 let a
/// series with `scale > 1` run past the top of the plot for a while.
const NORMALIZED_MIN: f64 = 0.0;
const NORMALIZED_MAX: f64 = 5.0;

// ---------------------------------------------------------------------------
// PlotGeometry
// ---------------------------------------------------------------------------

/// Pixel rectangle every series of one render pass is projected into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotGeometry {
    /// Top-left corner.
    pub origin: Pos2,
    pub width: f32,
    pub height: f32,
}

impl PlotGeometry {
    pub fn new(origin: Pos2, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Shrink a panel rectangle by the configured margins.
    pub fn inside(panel: Rect, margins: &Margins) -> Self {
        let origin = pos2(panel.left() + margins.left, panel.top() + margins.top);
        let width = (panel.width() - margins.left - margins.right).max(0.0);
        let height = (panel.height() - margins.top - margins.bottom).max(0.0);
        Self::new(origin, width, height)
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.width
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Normalise `values` to their own min/max, multiply by `scale` and clamp
/// to `[0, 5]`. A flat series uses a range of 1, so every value maps to 0.
pub fn normalize(values: &[f64], scale: f64) -> Vec<f64> {
    let Some((min, max)) = min_max(values) else {
        return Vec::new();
    };
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    values
        .iter()
        .map(|v| (((v - min) / range) * scale).clamp(NORMALIZED_MIN, NORMALIZED_MAX))
        .collect()
}

/// Map a processed series to screen positions inside `plot`.
///
/// x is spread evenly from the left to the right edge; y grows upward from
/// the bottom edge and is clamped to the plot. Fewer than two samples
/// produce nothing.
pub fn project(values: &[f64], plot: &PlotGeometry, scale: f64) -> Vec<Pos2> {
    let n = values.len();
    if n < 2 {
        return Vec::new();
    }

    let last = (n - 1) as f64;
    let width = plot.width as f64;
    let height = plot.height as f64;
    let top = plot.top() as f64;
    let bottom = plot.bottom() as f64;

    normalize(values, scale)
        .into_iter()
        .enumerate()
        .map(|(i, norm)| {
            let x = plot.left() as f64 + (i as f64 / last) * width;
            let y = (bottom - norm * height).clamp(top, bottom);
            pos2(x as f32, y as f32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> PlotGeometry {
        PlotGeometry::new(pos2(60.0, 10.0), 400.0, 200.0)
    }

    #[test]
    fn short_series_project_to_nothing() {
        assert!(project(&[], &plot(), 1.0).is_empty());
        assert!(project(&[3.0], &plot(), 1.0).is_empty());
    }

    #[test]
    fn endpoints_span_the_plot() {
        let pts = project(&[0.0, 5.0, 10.0], &plot(), 1.0);
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0], pos2(60.0, 210.0));
        assert_eq!(pts[1], pos2(260.0, 110.0));
        assert_eq!(pts[2], pos2(460.0, 10.0));
    }

    #[test]
    fn flat_series_is_a_single_row() {
        let pts = project(&[7.0; 6], &plot(), 1.0);
        assert_eq!(pts.len(), 6);
        assert!(pts.iter().all(|p| p.y == pts[0].y));
        assert_eq!(pts[0].y, plot().bottom());
    }

    #[test]
    fn normalized_values_stay_within_scale_and_clamp() {
        let values = [-3.0, 1.0, 4.0, 10.0, 2.5];
        for scale in [0.5, 1.0, 2.0] {
            for v in normalize(&values, scale) {
                assert!((0.0..=scale).contains(&v), "{v} outside [0, {scale}]");
            }
        }
        let big = normalize(&values, 8.0);
        assert!(big.iter().all(|v| (0.0..=5.0).contains(v)));
        assert_eq!(big[3], 5.0);
    }

    #[test]
    fn pixels_never_leave_the_plot() {
        let values = [-3.0, 1.0, 4.0, 10.0, 2.5];
        let geom = plot();
        for scale in [0.25, 1.0, 3.0, 10.0] {
            for p in project(&values, &geom, scale) {
                assert!(p.y >= geom.top() && p.y <= geom.bottom());
                assert!(p.x >= geom.left() && p.x <= geom.right());
            }
        }
    }

    #[test]
    fn half_scale_lifts_max_to_mid_height() {
        let pts = project(&[0.0, 1.0], &plot(), 0.5);
        assert_eq!(pts[1].y, 110.0);
    }

    #[test]
    fn geometry_from_panel_and_margins() {
        let panel = Rect::from_min_max(pos2(0.0, 0.0), pos2(500.0, 300.0));
        let geom = PlotGeometry::inside(panel, &Margins::default());
        assert_eq!(geom.origin, pos2(60.0, 10.0));
        assert_eq!(geom.width, 430.0);
        assert_eq!(geom.height, 250.0);
    }
}
