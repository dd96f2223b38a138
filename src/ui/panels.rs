use eframe::egui::{self, Color32, ColorImage, Rect, RichText, ScrollArea, Ui};

use crate::analysis::analyze;
use crate::color::generate_palette;
use crate::data::export::{export_csv, save_plot_png};
use crate::state::{AggregationWindow, AppState};
use crate::transform::limit_recent;

// ---------------------------------------------------------------------------
// Left side panel – per-series controls
// ---------------------------------------------------------------------------

/// Render the left series panel: visibility, vertical scale and aggregation.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    if state.table.is_none() {
        ui.label("No file loaded.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.set_all_visible(true);
        }
        if ui.small_button("None").clicked() {
            state.set_all_visible(false);
        }
    });

    let Some(table) = &state.table else {
        return;
    };
    let palette = generate_palette(table.len());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, column) in table.columns().iter().enumerate() {
                let Some(sv) = state.view.series.get_mut(&column.name) else {
                    continue;
                };
                let text = RichText::new(&column.name).strong().color(palette[idx]);
                ui.checkbox(&mut sv.visible, text);

                ui.add_enabled_ui(sv.visible, |ui: &mut Ui| {
                    ui.indent(&column.name, |ui: &mut Ui| {
                        let mut percent = sv.scale * 100.0;
                        let slider = egui::Slider::new(&mut percent, 10.0..=500.0)
                            .suffix("%")
                            .text("scale");
                        if ui.add(slider).changed() {
                            sv.scale = percent / 100.0;
                        }

                        egui::ComboBox::from_id_salt(("window", &column.name))
                            .selected_text(format!("Aggregate: {}", sv.window))
                            .show_ui(ui, |ui: &mut Ui| {
                                for size in AggregationWindow::CHOICES {
                                    if let Some(w) = AggregationWindow::from_choice(size) {
                                        ui.selectable_value(&mut sv.window, w, w.to_string());
                                    }
                                }
                            });
                        ui.label(format!("{} samples", column.len()));
                    });
                });
                ui.add_space(4.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Right side panel – analysis
// ---------------------------------------------------------------------------

/// Render analysis reports for every visible column.
pub fn analysis_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Analysis");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No file loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for column in table.columns() {
                let sv = state.view.series_view(&column.name);
                if !sv.visible {
                    continue;
                }
                let values = limit_recent(&column.values, state.view.recent());
                if let Some(report) = analyze(values, sv.window.size()) {
                    ui.label(RichText::new(report.report(&column.name)).monospace());
                    ui.separator();
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let has_table = state.table.is_some();
            if ui
                .add_enabled(has_table, egui::Button::new("Export PNG…"))
                .clicked()
            {
                state.png_export_requested = true;
                ui.close_menu();
            }
            if ui
                .add_enabled(has_table, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_csv_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} columns, {} rows, {} visible",
                table.len(),
                table.max_len(),
                state.view.visible_columns(table).len()
            ));
        }

        ui.separator();

        let (lo, hi) = state.recent_limit_bounds();
        let view = &mut state.view;
        ui.checkbox(&mut view.limit_recent, "Limit recent");
        ui.add_enabled(
            view.limit_recent,
            egui::Slider::new(&mut view.recent_limit, lo..=hi),
        );

        ui.separator();

        for (flag, label) in [
            (&mut view.show_derivative, "Derivative"),
            (&mut view.smoothing, "Smooth"),
            (&mut view.show_points, "Points"),
            (&mut view.show_analysis, "Analysis"),
        ] {
            if ui.selectable_label(*flag, label).clicked() {
                *flag = !*flag;
            }
        }

        if state.loading() {
            ui.spinner();
        }
        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::LIGHT_GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    if state.loading() {
        return;
    }
    let file = rfd::FileDialog::new()
        .set_title("Open time-series data")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.start_load(path);
    }
}

fn export_csv_dialog(state: &mut AppState) {
    let Some(table) = &state.table else {
        return;
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export visible columns")
        .set_file_name("export.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let names = state.view.visible_columns(table);
    match export_csv(table, &names, &path) {
        Ok(()) => state.status_message = Some(format!("Saved to: {}", path.display())),
        Err(e) => {
            log::error!("CSV export failed: {e:#}");
            state.report_error(format!("Error exporting CSV: {e}"));
        }
    }
}

/// Ask for a destination and write the plot area of `shot` as PNG.
pub fn save_png_dialog(state: &mut AppState, shot: &ColorImage, plot_rect: Rect, pixels_per_point: f32) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export plot image")
        .set_file_name("plot.png")
        .add_filter("PNG", &["png"])
        .save_file()
    else {
        return;
    };
    match save_plot_png(shot, plot_rect, pixels_per_point, &path) {
        Ok(()) => state.status_message = Some(format!("Saved to: {}", path.display())),
        Err(e) => {
            log::error!("PNG export failed: {e:#}");
            state.report_error(format!("Error exporting PNG: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Error modal
// ---------------------------------------------------------------------------

/// Block the UI with the pending error until the user acknowledges it.
pub fn error_modal(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.error_dialog.clone() else {
        return;
    };
    let response = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui: &mut Ui| {
        ui.set_max_width(420.0);
        ui.heading("Error");
        ui.add_space(4.0);
        ui.label(RichText::new(message).color(Color32::RED));
        ui.add_space(8.0);
        ui.button("OK").clicked()
    });
    if response.inner || response.should_close() {
        state.error_dialog = None;
    }
}
