mod analysis;
mod app;
mod color;
mod config;
mod data;
mod render;
mod state;
mod transform;
mod ui;

use app::TrendscopeApp;
use config::ViewerConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::from_env();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Trendscope – CSV Data Analyzer",
        options,
        Box::new(|cc| Ok(Box::new(TrendscopeApp::new(cc, config)))),
    )
}
