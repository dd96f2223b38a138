use std::time::Duration;

use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TrendscopeApp {
    pub state: AppState,
    /// Plot panel rectangle from the last frame, used to crop PNG exports.
    plot_rect: Option<egui::Rect>,
}

impl TrendscopeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self {
            state: AppState::new(config),
            plot_rect: None,
        }
    }

    /// Request a screenshot when asked, and save it once it arrives.
    fn handle_png_export(&mut self, ctx: &egui::Context) {
        if self.state.png_export_requested {
            self.state.png_export_requested = false;
            plot::request_screenshot(ctx);
        }

        let shot = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(shot) = shot else {
            return;
        };
        match self.plot_rect {
            Some(rect) => panels::save_png_dialog(&mut self.state, &shot, rect, ctx.pixels_per_point()),
            None => log::warn!("Screenshot arrived with no plot on screen"),
        }
    }
}

impl eframe::App for TrendscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.poll_load() {
            ctx.request_repaint();
        }
        if self.state.loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
        self.handle_png_export(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: series controls ----
        egui::SidePanel::left("series_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: analysis ----
        if self.state.view.show_analysis {
            egui::SidePanel::right("analysis_panel")
                .default_width(300.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::analysis_panel(ui, &self.state);
                });
        }

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            self.plot_rect = plot::series_plot(ui, &self.state);
        });

        panels::error_modal(ctx, &mut self.state);
    }
}
