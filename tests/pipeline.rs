use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

use bike_brush::config::EngineConfig;
use bike_brush::data::correlation::Factor;
use bike_brush::data::dataset::{Dataset, ViewSlot};
use bike_brush::data::loader::{load_file, read_csv};
use bike_brush::data::model::DailyAggregate;
use bike_brush::data::selection::{period_label, BrushRect, Selection};
use bike_brush::data::summary::Metric;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/rentals.csv")
}

fn dataset() -> Dataset {
    let rows = load_file(&fixture()).unwrap();
    Dataset::from_rows(&rows, &EngineConfig::default())
}

/// x = day of month, y = total rentals.
fn by_day(d: &DailyAggregate) -> [f64; 2] {
    [d.date.day() as f64, d.total_rentals]
}

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 6, day).unwrap()
}

#[test]
fn test_undated_rows_are_dropped_and_counted() {
    let ds = dataset();
    assert_eq!(ds.report.kept, 8);
    assert_eq!(ds.report.dropped, 2);
    assert_eq!(ds.records.len(), 8);
}

#[test]
fn test_zero_activity_day_is_absent_from_daily_series() {
    let ds = dataset();
    let dates: Vec<NaiveDate> = ds.daily.days.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![june(1), june(2), june(3)]);

    let totals: Vec<f64> = ds.daily.days.iter().map(|d| d.total_rentals).collect();
    assert_eq!(totals, vec![200.0, 500.0, 500.0]);
    assert_eq!(ds.daily.rentals_extent, Some((200.0, 500.0)));
}

#[test]
fn test_no_selection_covers_every_record() {
    let ds = dataset();
    let views = ds.recompute(&by_day, &Selection::None);

    assert_eq!(views.daily.len(), 3);
    // Records of the zero-activity day still feed the hourly profile.
    assert_eq!(views.records.len(), 8);
    assert_eq!(views.hourly.means[8], 137.5);
    assert_eq!(views.hourly.means[17], 162.5);
    assert_eq!(views.hourly.peak_label(), "Peak Hour: 5PM, Rental Average: 163");
    assert_eq!(period_label(views.period.as_ref()), "None");
    assert_eq!(views.correlation.dominant.len(), 2);
}

#[test]
fn test_rectangle_scopes_views_against_fixed_references() {
    let ds = dataset();
    let rect = Selection::Rect(BrushRect::from_corners([1.5, 0.0], [3.5, 1000.0]));
    let views = ds.recompute(&by_day, &rect);

    let dates: Vec<NaiveDate> = views.daily.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![june(2), june(3)]);
    assert_eq!(views.records.len(), 4);

    assert_eq!(views.hourly.means[8], 225.0);
    assert_eq!(views.hourly.means[17], 275.0);
    assert_eq!(views.hourly.peak.map(|p| p.hour), Some(17));

    let temperature = views
        .metrics
        .iter()
        .find(|m| m.metric == Metric::Temperature)
        .unwrap();
    assert!((temperature.value - 23.5).abs() < 1e-9);
    assert!((temperature.reference - 67.0 / 3.0).abs() < 1e-9);

    let rainfall = views
        .metrics
        .iter()
        .find(|m| m.metric == Metric::Rainfall)
        .unwrap();
    assert!((rainfall.value - 1.0).abs() < 1e-9);
    assert!((rainfall.reference - 1.0).abs() < 1e-9);

    assert_eq!(
        period_label(views.period.as_ref()),
        "6/2~6/3, Rental Average: 500"
    );

    // Equal daily totals leave nothing to correlate against.
    assert_eq!(views.correlation.coefficient(Factor::Temperature), None);
    assert_eq!(views.correlation.dominant_label(), "unavailable");
}

#[test]
fn test_empty_rectangle_yields_zeroed_views() {
    let ds = dataset();
    let rect = Selection::Rect(BrushRect::from_corners([10.0, 0.0], [20.0, 1000.0]));
    let views = ds.recompute(&by_day, &rect);

    assert!(views.daily.is_empty());
    assert!(views.records.is_empty());
    assert_eq!(views.hourly.peak_label(), "unavailable");
    assert!(views.metrics.iter().all(|m| m.value == 0.0));
    // References stay fixed to the whole dataset.
    let temperature = views
        .metrics
        .iter()
        .find(|m| m.metric == Metric::Temperature)
        .unwrap();
    assert!(temperature.reference > 0.0);
    assert_eq!(period_label(views.period.as_ref()), "None");
}

#[test]
fn test_stale_views_lose_to_newer_selection() {
    let ds = dataset();
    let mut slot = ViewSlot::default();

    let first = slot.begin();
    let second = slot.begin();
    let narrow = Selection::Rect(BrushRect::from_corners([0.5, 0.0], [1.5, 1000.0]));

    assert!(slot.publish(second, ds.recompute(&by_day, &narrow)));
    assert!(!slot.publish(first, ds.full_views()));
    assert_eq!(slot.current().map(|v| v.daily.len()), Some(1));
}

#[test]
fn test_in_memory_csv_matches_file_loader() {
    let text = std::fs::read_to_string(fixture()).unwrap();
    let rows = read_csv(csv::Reader::from_reader(text.as_bytes())).unwrap();
    assert_eq!(rows, load_file(&fixture()).unwrap());
    // Header whitespace is trimmed.
    assert_eq!(rows[0].get("Rented Bike Count").map(String::as_str), Some("100"));
}
