use eframe::egui::{self, Align2, Color32, FontId, Painter, Rect, Sense, Shape, Stroke, Ui, pos2};

use crate::config::ViewerConfig;
use crate::render::frame::{DrawCommand, render_frame};
use crate::render::projector::PlotGeometry;
use crate::state::AppState;

const BACKGROUND: Color32 = Color32::from_rgb(30, 30, 30);
const LEGEND_ROW_HEIGHT: f32 = 15.0;

// ---------------------------------------------------------------------------
// Series plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart in the central panel. Returns the panel rectangle so
/// a PNG export can crop the viewport screenshot to it.
pub fn series_plot(ui: &mut Ui, state: &AppState) -> Option<Rect> {
    let table = match &state.table {
        Some(t) => t,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a CSV file to plot its columns  (File → Open…)");
            });
            return None;
        }
    };

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let panel = response.rect;
    painter.rect_filled(panel, 0.0, BACKGROUND);

    let plot = PlotGeometry::inside(panel, &state.config.margins);
    for command in render_frame(table, &state.view, &plot, &state.config) {
        paint(&painter, &plot, &state.config, command);
    }

    Some(panel)
}

fn paint(painter: &Painter, plot: &PlotGeometry, config: &ViewerConfig, command: DrawCommand) {
    match command {
        DrawCommand::Axis { from, to } => {
            painter.line_segment([from, to], Stroke::new(1.0, Color32::LIGHT_GRAY));
        }
        DrawCommand::Polyline {
            points,
            color,
            width,
            dashed,
        } => {
            let stroke = Stroke::new(width, color);
            if dashed {
                painter.extend(Shape::dashed_line(
                    &points,
                    stroke,
                    config.derivative_dash,
                    config.derivative_gap,
                ));
            } else {
                painter.add(Shape::line(points, stroke));
            }
        }
        DrawCommand::Markers {
            points,
            color,
            radius,
        } => {
            for p in points {
                painter.circle_filled(p, radius, color);
            }
        }
        DrawCommand::Legend { row, text, color } => {
            let pos = pos2(
                plot.left() + 8.0,
                plot.top() + 4.0 + row as f32 * LEGEND_ROW_HEIGHT,
            );
            painter.text(pos, Align2::LEFT_TOP, text, FontId::monospace(12.0), color);
        }
    }
}

/// Ask the backend for a screenshot; it arrives as an input event next frame.
pub fn request_screenshot(ctx: &egui::Context) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
}
