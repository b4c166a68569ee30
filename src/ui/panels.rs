use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{correlation_color, correlation_ink, season_legend};
use crate::state::AppState;
use crate::ui::plot::metric_bar;

// ---------------------------------------------------------------------------
// Left side panel – weather summaries and correlation
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Weather");
    ui.separator();

    let Some(views) = state.current_views() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for summary in &views.metrics {
                metric_bar(ui, summary);
                ui.add_space(4.0);
            }
            ui.separator();

            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.strong("Important factors");
                ui.label(
                    RichText::new(format!("({})", views.correlation.dominant_label()))
                        .color(Color32::from_rgb(0x29, 0x80, 0xb9))
                        .strong(),
                );
            });

            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::auto())
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Factor");
                    });
                    header.col(|ui| {
                        ui.strong("r (rentals)");
                    });
                })
                .body(|mut body| {
                    for entry in &views.correlation.entries {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(entry.factor.name());
                            });
                            row.col(|ui| {
                                let text = entry
                                    .coefficient
                                    .map_or_else(|| "–".to_string(), |r| format!("{r:.2}"));
                                ui.label(
                                    RichText::new(text)
                                        .background_color(correlation_color(entry.coefficient))
                                        .color(correlation_ink(entry.coefficient))
                                        .strong(),
                                );
                            });
                        });
                    }
                });
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let selected_days = state.current_views().map_or(0, |v| v.daily.len());
            ui.label(format!(
                "{} records, {} days, {} selected",
                ds.records.len(),
                ds.daily.len(),
                selected_days
            ));
            if ds.report.dropped > 0 {
                ui.label(
                    RichText::new(format!("{} undated rows skipped", ds.report.dropped))
                        .color(Color32::DARK_GRAY),
                );
            }
        }

        ui.separator();

        if ui.button("Clear selection").clicked() {
            state.clear_selection();
        }

        ui.separator();

        for (label, color) in season_legend() {
            ui.label(RichText::new("●").color(color));
            ui.label(label);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open hourly rental data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
