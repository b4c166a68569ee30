use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::format::thousands;
use super::model::{DailyAggregate, RawRecord};

// ---------------------------------------------------------------------------
// Selection rectangle
// ---------------------------------------------------------------------------

/// Closed, axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    /// Build from any two opposite corners.
    pub fn from_corners(a: [f64; 2], b: [f64; 2]) -> Self {
        BrushRect {
            x0: a[0].min(b[0]),
            y0: a[1].min(b[1]),
            x1: a[0].max(b[0]),
            y1: a[1].max(b[1]),
        }
    }

    /// Inclusive on all four sides. NaN coordinates never match.
    pub fn contains(&self, p: [f64; 2]) -> bool {
        p[0] >= self.x0 && p[0] <= self.x1 && p[1] >= self.y0 && p[1] <= self.y1
    }
}

/// The current brush state. `None` means "use all data".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum Selection {
    #[default]
    None,
    Rect(BrushRect),
}

// ---------------------------------------------------------------------------
// Projection: daily aggregate → screen point
// ---------------------------------------------------------------------------

/// Maps a daily aggregate to its `[x, y]` screen position under the current
/// axis scales.
pub trait Projection {
    fn project(&self, day: &DailyAggregate) -> [f64; 2];
}

impl<F> Projection for F
where
    F: Fn(&DailyAggregate) -> [f64; 2],
{
    fn project(&self, day: &DailyAggregate) -> [f64; 2] {
        self(day)
    }
}

/// Linear date axis × linear rentals axis.
///
/// The rentals range is given top-down (`[height, 0]` for a plot whose y
/// grows downwards). A collapsed domain maps to the middle of its range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisProjection {
    pub date_domain: (NaiveDate, NaiveDate),
    pub x_range: (f64, f64),
    pub rentals_domain: (f64, f64),
    pub y_range: (f64, f64),
}

impl AxisProjection {
    fn scale(v: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
        let span = domain.1 - domain.0;
        if span == 0.0 {
            return (range.0 + range.1) / 2.0;
        }
        range.0 + (v - domain.0) / span * (range.1 - range.0)
    }

    fn day_number(d: NaiveDate) -> f64 {
        d.num_days_from_ce() as f64
    }
}

impl Projection for AxisProjection {
    fn project(&self, day: &DailyAggregate) -> [f64; 2] {
        let dates = (
            Self::day_number(self.date_domain.0),
            Self::day_number(self.date_domain.1),
        );
        [
            Self::scale(Self::day_number(day.date), dates, self.x_range),
            Self::scale(day.total_rentals, self.rentals_domain, self.y_range),
        ]
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Daily aggregates whose projected point lies inside the selection.
pub fn select_daily<P>(days: &[DailyAggregate], projection: &P, selection: &Selection) -> Vec<DailyAggregate>
where
    P: Projection + ?Sized,
{
    match selection {
        Selection::None => days.to_vec(),
        Selection::Rect(rect) => days
            .iter()
            .filter(|d| rect.contains(projection.project(d)))
            .copied()
            .collect(),
    }
}

/// Every raw record whose date appears in `selected`, in dataset order.
pub fn expand_records(selected: &[DailyAggregate], records: &[RawRecord]) -> Vec<RawRecord> {
    let dates: BTreeSet<NaiveDate> = selected.iter().map(|d| d.date).collect();
    if dates.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| dates.contains(&r.date))
        .copied()
        .collect()
}

/// The two outputs of the selection filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionResult {
    pub daily: Vec<DailyAggregate>,
    pub records: Vec<RawRecord>,
}

/// Filter the canonical series and re-expand to hourly records.
///
/// With [`Selection::None`] both outputs are the full inputs, including
/// records of zero-activity days that the daily series leaves out.
pub fn apply_selection<P>(
    days: &[DailyAggregate],
    records: &[RawRecord],
    projection: &P,
    selection: &Selection,
) -> SelectionResult
where
    P: Projection + ?Sized,
{
    match selection {
        Selection::None => SelectionResult {
            daily: days.to_vec(),
            records: records.to_vec(),
        },
        Selection::Rect(_) => {
            let daily = select_daily(days, projection, selection);
            let records = expand_records(&daily, records);
            SelectionResult { daily, records }
        }
    }
}

// ---------------------------------------------------------------------------
// Brush period summary
// ---------------------------------------------------------------------------

/// Date span and mean daily rentals of a brushed selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrushPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub mean_daily_rentals: f64,
}

impl BrushPeriod {
    /// `None` unless a rectangle is active and selected at least one day.
    pub fn from_selection(selection: &Selection, daily: &[DailyAggregate]) -> Option<Self> {
        if matches!(selection, Selection::None) {
            return None;
        }
        let start = daily.iter().map(|d| d.date).min()?;
        let end = daily.iter().map(|d| d.date).max()?;
        let mean_daily_rentals =
            daily.iter().map(|d| d.total_rentals).sum::<f64>() / daily.len() as f64;
        Some(BrushPeriod {
            start,
            end,
            mean_daily_rentals,
        })
    }

    /// `"6/1~6/30, Rental Average: 27,104"`
    pub fn label(&self) -> String {
        format!(
            "{}/{}~{}/{}, Rental Average: {}",
            self.start.month(),
            self.start.day(),
            self.end.month(),
            self.end.day(),
            thousands(self.mean_daily_rentals)
        )
    }
}

/// Brush period label, `"None"` when nothing is brushed.
pub fn period_label(period: Option<&BrushPeriod>) -> String {
    period.map_or_else(|| "None".to_string(), BrushPeriod::label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{daily, record};

    /// x = day of month, y = total rentals.
    fn identity(d: &DailyAggregate) -> [f64; 2] {
        [d.date.day() as f64, d.total_rentals]
    }

    fn series() -> Vec<DailyAggregate> {
        vec![daily(1, 100.0), daily(2, 250.0), daily(3, 400.0), daily(4, 50.0)]
    }

    #[test]
    fn test_no_selection_returns_everything() {
        let days = series();
        let records = vec![record(1, 0, 100.0), record(5, 0, 0.0)];
        let out = apply_selection(&days, &records, &identity, &Selection::None);
        assert_eq!(out.daily, days);
        // Records of days missing from the daily series stay in.
        assert_eq!(out.records, records);
    }

    #[test]
    fn test_rect_bounds_are_inclusive() {
        let rect = Selection::Rect(BrushRect::from_corners([3.0, 400.0], [2.0, 250.0]));
        let picked = select_daily(&series(), &identity, &rect);
        let dates: Vec<u32> = picked.iter().map(|d| d.date.day()).collect();
        assert_eq!(dates, vec![2, 3]);
    }

    #[test]
    fn test_selection_is_idempotent() {
        let days = series();
        let rect = Selection::Rect(BrushRect::from_corners([0.0, 0.0], [3.5, 300.0]));
        let once = select_daily(&days, &identity, &rect);
        let twice = select_daily(&days, &identity, &rect);
        assert_eq!(once, twice);
        assert_eq!(select_daily(&once, &identity, &rect), once);
    }

    #[test]
    fn test_expand_records_by_date() {
        let records = vec![
            record(1, 0, 10.0),
            record(2, 0, 20.0),
            record(1, 5, 30.0),
            record(3, 0, 40.0),
        ];
        let picked = vec![daily(1, 40.0), daily(3, 40.0)];
        let expanded = expand_records(&picked, &records);
        let hours: Vec<_> = expanded.iter().map(|r| (r.date.day(), r.hour_slot())).collect();
        assert_eq!(hours, vec![(1, Some(0)), (1, Some(5)), (3, Some(0))]);
    }

    #[test]
    fn test_empty_rect_yields_no_records() {
        let rect = Selection::Rect(BrushRect::from_corners([10.0, 0.0], [20.0, 1000.0]));
        let out = apply_selection(&series(), &[record(1, 0, 100.0)], &identity, &rect);
        assert!(out.daily.is_empty());
        assert!(out.records.is_empty());
    }

    #[test]
    fn test_nan_projection_never_matches() {
        let rect = Selection::Rect(BrushRect::from_corners([f64::MIN, f64::MIN], [f64::MAX, f64::MAX]));
        let nan = |_: &DailyAggregate| [f64::NAN, 0.0];
        assert!(select_daily(&series(), &nan, &rect).is_empty());
    }

    #[test]
    fn test_axis_projection_inverts_y() {
        let proj = AxisProjection {
            date_domain: (daily(1, 0.0).date, daily(11, 0.0).date),
            x_range: (0.0, 800.0),
            rentals_domain: (0.0, 1000.0),
            y_range: (130.0, 0.0),
        };
        let p = proj.project(&daily(6, 250.0));
        assert_eq!(p, [400.0, 97.5]);

        let flat = AxisProjection {
            rentals_domain: (5.0, 5.0),
            ..proj
        };
        assert_eq!(flat.project(&daily(1, 5.0))[1], 65.0);
    }

    #[test]
    fn test_brush_period() {
        let rect = Selection::Rect(BrushRect::from_corners([0.0, 0.0], [1.0, 1.0]));
        let picked = vec![daily(2, 1000.0), daily(5, 2000.0)];
        let period = BrushPeriod::from_selection(&rect, &picked).unwrap();
        assert_eq!(period.label(), "1/2~1/5, Rental Average: 1,500");

        assert!(BrushPeriod::from_selection(&Selection::None, &picked).is_none());
        assert!(BrushPeriod::from_selection(&rect, &[]).is_none());
        assert_eq!(period_label(None), "None");
    }
}
