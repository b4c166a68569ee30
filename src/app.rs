use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BikeBrushApp {
    pub state: AppState,
}

impl BikeBrushApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BikeBrushApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: weather summaries ----
        egui::SidePanel::left("weather_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: daily brush + hourly profile ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::daily_plot(ui, &mut self.state);
            ui.separator();
            plot::hourly_chart(ui, &self.state);
        });
    }
}
