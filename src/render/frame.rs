use eframe::egui::{Color32, Pos2, pos2};

use crate::color::generate_palette;
use crate::config::ViewerConfig;
use crate::data::model::ColumnTable;
use crate::state::{SeriesView, ViewState};
use crate::transform::numeric::mean;
use crate::transform::{aggregate, derivative, limit_recent, smooth};

use super::projector::{PlotGeometry, project};

// ---------------------------------------------------------------------------
// Per-series processing
// ---------------------------------------------------------------------------

/// Values derived from one column for a single render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSeries {
    /// After the recent-sample limit and aggregation.
    pub aggregated: Vec<f64>,
    /// What the primary trace draws (aggregated, optionally smoothed).
    pub primary: Vec<f64>,
    /// Derivative of `aggregated`, optionally smoothed; only when enabled.
    pub derivative: Option<Vec<f64>>,
}

/// Run the transform chain for one column:
/// limit → aggregate → {smooth?} and, when enabled, aggregate → derivative → {smooth?}.
pub fn process_series(values: &[f64], series: &SeriesView, view: &ViewState) -> ProcessedSeries {
    let recent = limit_recent(values, view.recent());
    let aggregated = aggregate(recent, series.window.size());

    let maybe_smooth = |v: Vec<f64>| if view.smoothing { smooth(&v) } else { v };

    let deriv = view
        .show_derivative
        .then(|| maybe_smooth(derivative(&aggregated)));
    let primary = maybe_smooth(aggregated.clone());

    ProcessedSeries {
        aggregated,
        primary,
        derivative: deriv,
    }
}

/// Legend line: change from first to last sample and the average.
pub fn legend_text(name: &str, aggregated: &[f64]) -> String {
    match (aggregated.first(), aggregated.last(), mean(aggregated)) {
        (Some(first), Some(last), Some(avg)) => {
            format!("{name}: Δ={:.2} | Avg={avg:.2}", last - first)
        }
        _ => format!("{name}: no data"),
    }
}

// ---------------------------------------------------------------------------
// Draw commands
// ---------------------------------------------------------------------------

/// One drawing primitive; the UI layer plays these back on a painter.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Axis {
        from: Pos2,
        to: Pos2,
    },
    Polyline {
        points: Vec<Pos2>,
        color: Color32,
        width: f32,
        dashed: bool,
    },
    Markers {
        points: Vec<Pos2>,
        color: Color32,
        radius: f32,
    },
    Legend {
        row: usize,
        text: String,
        color: Color32,
    },
}

/// Build everything needed to draw one frame. Pure: same inputs, same output.
///
/// Series colours come from a palette indexed by column position, so a
/// column keeps its colour while others are hidden.
pub fn render_frame(
    table: &ColumnTable,
    view: &ViewState,
    plot: &PlotGeometry,
    config: &ViewerConfig,
) -> Vec<DrawCommand> {
    let mut commands = vec![
        DrawCommand::Axis {
            from: pos2(plot.left(), plot.top()),
            to: pos2(plot.left(), plot.bottom()),
        },
        DrawCommand::Axis {
            from: pos2(plot.left(), plot.bottom()),
            to: pos2(plot.right(), plot.bottom()),
        },
    ];

    let palette = generate_palette(table.len());
    let mut legend_row = 0;

    for (idx, column) in table.columns().iter().enumerate() {
        let series = view.series_view(&column.name);
        if !series.visible {
            continue;
        }
        let color = palette[idx];
        let processed = process_series(&column.values, &series, view);
        log::debug!(
            "{}: {} samples -> {} points (window {})",
            column.name,
            column.len(),
            processed.primary.len(),
            series.window.size()
        );

        let points = project(&processed.primary, plot, series.scale);
        if view.show_points && !points.is_empty() {
            commands.push(DrawCommand::Markers {
                points: points.clone(),
                color,
                radius: config.marker_radius,
            });
        }
        commands.push(DrawCommand::Polyline {
            points,
            color,
            width: config.line_width,
            dashed: false,
        });

        if let Some(deriv) = &processed.derivative {
            commands.push(DrawCommand::Polyline {
                points: project(deriv, plot, series.scale),
                color: color.gamma_multiply(0.7),
                width: config.line_width * 0.75,
                dashed: true,
            });
        }

        commands.push(DrawCommand::Legend {
            row: legend_row,
            text: legend_text(&column.name, &processed.aggregated),
            color,
        });
        legend_row += 1;
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;
    use crate::state::AggregationWindow;

    fn setup() -> (ColumnTable, ViewState, PlotGeometry, ViewerConfig) {
        let table = ColumnTable::from_columns(vec![
            Column::new("up", (0..20).map(f64::from).collect()),
            Column::new("zigzag", (0..20).map(|i| (i % 2) as f64).collect()),
        ]);
        let config = ViewerConfig::default();
        let mut view = ViewState::new(&config);
        view.reset_for(&table);
        let plot = PlotGeometry::new(pos2(60.0, 10.0), 400.0, 300.0);
        (table, view, plot, config)
    }

    fn polylines(commands: &[DrawCommand]) -> Vec<(usize, bool)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Polyline { points, dashed, .. } => Some((points.len(), *dashed)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn derivative_is_taken_from_aggregated_values() {
        let (_, mut view, _, _) = setup();
        view.show_derivative = true;
        let series = SeriesView {
            window: AggregationWindow::from_choice(2).unwrap(),
            ..SeriesView::default()
        };
        let out = process_series(&[1.0, 3.0, 5.0, 7.0, 9.0, 11.0], &series, &view);
        assert_eq!(out.aggregated, vec![2.0, 6.0, 10.0]);
        assert_eq!(out.derivative, Some(vec![4.0, 4.0, 4.0]));
    }

    #[test]
    fn smoothing_applies_to_both_branches() {
        let (_, mut view, _, _) = setup();
        view.smoothing = true;
        view.show_derivative = true;
        let out = process_series(&[0.0, 3.0, 0.0, 3.0], &SeriesView::default(), &view);
        assert_eq!(out.aggregated, vec![0.0, 3.0, 0.0, 3.0]);
        assert_eq!(out.primary, vec![0.0, 1.0, 2.0, 3.0]);
        // derivative [3, 0, 0, 3] smoothed
        assert_eq!(out.derivative, Some(vec![3.0, 1.0, 1.0, 3.0]));
    }

    #[test]
    fn recent_limit_cuts_before_aggregation() {
        let (_, mut view, _, _) = setup();
        view.recent_limit = 4;
        let series = SeriesView {
            window: AggregationWindow::from_choice(2).unwrap(),
            ..SeriesView::default()
        };
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        assert_eq!(process_series(&values, &series, &view).aggregated, vec![6.5, 8.5]);

        view.limit_recent = false;
        assert_eq!(process_series(&values, &series, &view).aggregated.len(), 5);
    }

    #[test]
    fn frame_has_axes_lines_and_legends() {
        let (table, view, plot, config) = setup();
        let commands = render_frame(&table, &view, &plot, &config);
        assert!(matches!(commands[0], DrawCommand::Axis { .. }));
        assert_eq!(polylines(&commands), vec![(20, false), (20, false)]);
        let legends: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Legend { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(legends, vec!["up: Δ=19.00 | Avg=9.50", "zigzag: Δ=1.00 | Avg=0.50"]);
    }

    #[test]
    fn hidden_series_are_skipped_and_keep_colours() {
        let (table, mut view, plot, config) = setup();
        let all = render_frame(&table, &view, &plot, &config);
        view.series.get_mut("up").unwrap().visible = false;
        let only_zigzag = render_frame(&table, &view, &plot, &config);

        let zigzag_color = |cmds: &[DrawCommand]| {
            cmds.iter().rev().find_map(|c| match c {
                DrawCommand::Legend { color, .. } => Some(*color),
                _ => None,
            })
        };
        assert_eq!(polylines(&only_zigzag).len(), 1);
        assert_eq!(zigzag_color(&all), zigzag_color(&only_zigzag));
    }

    #[test]
    fn derivative_and_points_add_commands() {
        let (table, mut view, plot, config) = setup();
        view.show_derivative = true;
        view.show_points = true;
        let commands = render_frame(&table, &view, &plot, &config);
        assert_eq!(
            polylines(&commands),
            vec![(20, false), (20, true), (20, false), (20, true)]
        );
        let markers = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Markers { .. }))
            .count();
        assert_eq!(markers, 2);
    }

    #[test]
    fn legend_for_empty_series() {
        assert_eq!(legend_text("x", &[]), "x: no data");
    }
}
