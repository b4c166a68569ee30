mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::BikeBrushApp;
use bike_brush::config::EngineConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = EngineConfig::load().unwrap_or_else(|e| {
        log::error!("{e}; using default engine settings");
        EngineConfig::default()
    });

    let mut state = AppState::new(config);
    // Optional file to open on start-up.
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        state.load_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Brush – Rental Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(BikeBrushApp::new(state)))),
    )
}
