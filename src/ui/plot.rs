use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, HLine, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Polygon};

use bike_brush::data::hourly::{clock_label, HOURS};
use bike_brush::data::model::{DailyAggregate, DailySeries, Season};
use bike_brush::data::selection::{BrushRect, Selection};
use bike_brush::data::summary::MetricSummary;

use crate::color::{season_color, sequential_blue};
use crate::state::AppState;

/// Plot x coordinate of a calendar day.
fn day_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Where a day sits on the daily plot.
fn plot_point(day: &DailyAggregate) -> [f64; 2] {
    [day_x(day.date), day.total_rentals]
}

fn month_tick(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}

/// Fixed view of the daily plot: the full date extent padded by a few days,
/// rentals from zero to 10% above the busiest day.
pub fn daily_bounds(series: &DailySeries) -> PlotBounds {
    let (x0, x1) = series
        .date_extent
        .map_or((0.0, 1.0), |(first, last)| (day_x(first) - 5.0, day_x(last) + 5.0));
    let y1 = series
        .rentals_extent
        .map_or(1.0, |(_, max)| (max * 1.1).max(1.0));
    PlotBounds::from_min_max([x0, 0.0], [x1, y1])
}

fn clamp_to(bounds: &PlotBounds, p: PlotPoint) -> [f64; 2] {
    let (min, max) = (bounds.min(), bounds.max());
    [p.x.clamp(min[0], max[0]), p.y.clamp(min[1], max[1])]
}

// ---------------------------------------------------------------------------
// Daily scatter with rectangle brush (central panel, top)
// ---------------------------------------------------------------------------

/// Render the daily plot and turn drags on it into selections.
///
/// The view is pinned to [`daily_bounds`]; returns the bounds the plot was
/// drawn with, or `None` when no dataset is loaded.
pub fn daily_plot(ui: &mut Ui, state: &mut AppState) -> Option<PlotBounds> {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore rentals  (File → Open…)");
        });
        return None;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Daily Bike Rentals Over the Year");
        ui.label(
            RichText::new(format!("Brush period: {}", state.period_text()))
                .color(Color32::from_rgb(0x29, 0x80, 0xb9))
                .strong(),
        );
    });

    let selected: Vec<NaiveDate> = state
        .current_views()
        .map(|v| v.daily.iter().map(|d| d.date).collect())
        .unwrap_or_default();
    let brushing = !matches!(state.selection, Selection::None);
    let brush = state.brush.corners();
    let bounds = daily_bounds(&dataset.daily);

    let plot_response = Plot::new("daily_plot")
        .height(220.0)
        .legend(egui_plot::Legend::default())
        .x_axis_label("Month")
        .y_axis_label("Total Rented Bike Count")
        .x_axis_formatter(|mark, _range| month_tick(mark.value))
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            // Items never widen the view, or the brush would feed back into it.
            plot_ui.set_plot_bounds(bounds);

            let groups: Vec<Option<Season>> = Season::ALL.iter().copied().map(Some).chain([None]).collect();
            for season in groups {
                let points: Vec<[f64; 2]> = dataset
                    .daily
                    .days
                    .iter()
                    .filter(|d| d.season == season)
                    .map(plot_point)
                    .collect();
                if points.is_empty() {
                    continue;
                }
                let name = season.map_or("Unknown", |s| s.label());
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(3.0)
                        .color(season_color(season))
                        .name(name),
                );
            }

            if brushing {
                // Ring the selected days so they stand out from the rest.
                let ring: Vec<[f64; 2]> = dataset
                    .daily
                    .days
                    .iter()
                    .filter(|d| selected.binary_search(&d.date).is_ok())
                    .map(plot_point)
                    .collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(ring))
                        .radius(5.0)
                        .filled(false)
                        .color(Color32::BLACK),
                );
            }

            if let Some((p, q)) = brush {
                let corners = vec![[p[0], p[1]], [q[0], p[1]], [q[0], q[1]], [p[0], q[1]]];
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(corners))
                        .fill_color(Color32::from_rgba_unmultiplied(120, 120, 120, 40))
                        .stroke(egui::Stroke::new(1.0, Color32::GRAY)),
                );
            }
        });

    let response = plot_response.response;
    let transform = plot_response.transform;
    let shown = *transform.bounds();
    let to_plot = |pos: egui::Pos2| clamp_to(&shown, transform.value_from_position(pos));

    if response.drag_started() {
        state.brush.anchor = response.interact_pointer_pos().map(to_plot);
        state.brush.current = state.brush.anchor;
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            state.brush.current = Some(to_plot(pos));
        }
    }

    if response.drag_stopped() {
        if let Some((a, b)) = state.brush.corners() {
            state.brush_select(BrushRect::from_corners(a, b), &plot_point);
        }
    } else if response.clicked() {
        state.clear_selection();
    }

    Some(shown)
}

// ---------------------------------------------------------------------------
// Hourly profile (central panel, bottom)
// ---------------------------------------------------------------------------

pub fn hourly_chart(ui: &mut Ui, state: &AppState) {
    let Some(views) = state.current_views() else {
        return;
    };
    let profile = &views.hourly;

    ui.label(
        RichText::new(profile.peak_label())
            .color(Color32::from_rgb(0x29, 0x80, 0xb9))
            .strong()
            .size(18.0),
    );

    let max = profile.max_mean();
    let bars: Vec<Bar> = (0..HOURS)
        .map(|h| {
            let mean = profile.means[h];
            Bar::new(h as f64, mean)
                .width(0.9)
                .fill(sequential_blue(mean / (max + 500.0)))
                .name(clock_label(h))
        })
        .collect();

    Plot::new("hourly_plot")
        .height(160.0)
        .x_axis_label("Hour")
        .y_axis_label("Avg rentals")
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Mean rentals per hour"));
        });
}

// ---------------------------------------------------------------------------
// Metric bar against its global reference (side panel)
// ---------------------------------------------------------------------------

pub fn metric_bar(ui: &mut Ui, summary: &MetricSummary) {
    let metric = summary.metric;
    ui.label(RichText::new(metric.title()).strong());

    Plot::new(("metric_bar", metric.title()))
        .height(100.0)
        .show_x(false)
        .show_axes([false, true])
        .include_x(-1.0)
        .include_x(1.0)
        .include_y(0.0)
        .include_y(summary.axis_max)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(vec![Bar::new(0.0, summary.value)
                    .width(0.8)
                    .fill(Color32::from_rgb(0x69, 0xb3, 0xa2))])
                .name(format!("{:.1}", summary.value)),
            );
            plot_ui.hline(
                HLine::new(summary.reference)
                    .color(Color32::from_rgb(0xff, 0x6b, 0x6b))
                    .style(egui_plot::LineStyle::dashed_loose())
                    .name(metric.reference_label()),
            );
        });
    ui.label(format!(
        "{:.1}  ({} {:.1})",
        summary.value,
        metric.reference_label(),
        summary.reference
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bike_brush::config::EngineConfig;
    use bike_brush::data::dataset::Dataset;
    use bike_brush::data::model::RawRow;
    use bike_brush::data::normalize::columns;

    fn state_with_days() -> AppState {
        let rows: Vec<RawRow> = (1..=20u32)
            .map(|day| {
                let mut row = RawRow::new();
                row.insert(columns::DATE.to_string(), format!("{day:02}/06/2018"));
                row.insert(columns::HOUR.to_string(), "8".to_string());
                row.insert(columns::RENTED_COUNT.to_string(), (200 + day * 15).to_string());
                row.insert(columns::SEASON.to_string(), "Summer".to_string());
                row
            })
            .collect();
        let mut state = AppState::new(EngineConfig::default());
        state.set_dataset(Dataset::from_rows(&rows, &EngineConfig::default()));
        state
    }

    fn render(ctx: &egui::Context, state: &mut AppState) -> Option<PlotBounds> {
        let mut shown = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                shown = daily_plot(ui, state);
            });
        });
        shown
    }

    #[test]
    fn test_daily_bounds_enclose_every_day() {
        let state = state_with_days();
        let series = &state.dataset.as_ref().unwrap().daily;
        let bounds = daily_bounds(series);
        for day in &series.days {
            let [x, y] = plot_point(day);
            assert!(x > bounds.min()[0] && x < bounds.max()[0]);
            assert!(y >= bounds.min()[1] && y < bounds.max()[1]);
        }
        assert_eq!(bounds.min()[1], 0.0);
    }

    #[test]
    fn test_empty_series_still_has_a_view() {
        let bounds = daily_bounds(&DailySeries::default());
        assert!(bounds.max()[0] > bounds.min()[0]);
        assert!(bounds.max()[1] > bounds.min()[1]);
    }

    #[test]
    fn test_brush_past_the_edge_keeps_bounds_fixed() {
        let mut state = state_with_days();
        let expected = daily_bounds(&state.dataset.as_ref().unwrap().daily);
        // A rectangle reaching well beyond the data on every side.
        state.brush.anchor = Some([expected.min()[0] - 400.0, -1.0e4]);
        state.brush.current = Some([expected.max()[0] + 400.0, 1.0e5]);

        let ctx = egui::Context::default();
        for _ in 0..8 {
            let shown = render(&ctx, &mut state).unwrap();
            assert_eq!(shown.min(), expected.min());
            assert_eq!(shown.max(), expected.max());
        }
    }

    #[test]
    fn test_no_dataset_draws_no_plot() {
        let mut state = AppState::new(EngineConfig::default());
        let ctx = egui::Context::default();
        assert!(render(&ctx, &mut state).is_none());
    }
}
