use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RawRow – one untyped row handed over by the loader
// ---------------------------------------------------------------------------

/// Column name → raw cell text, exactly as read from the source file.
pub type RawRow = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Reading – a numeric cell after coercion
// ---------------------------------------------------------------------------

/// A numeric field after text coercion.
///
/// Malformed cells are kept as [`Reading::Invalid`] instead of a NaN sentinel
/// so every reducer decides explicitly what to do with them
/// (see [`InvalidPolicy`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Reading {
    Valid(f64),
    Invalid,
}

impl Reading {
    /// Coerce cell text the way a lenient numeric cast does: surrounding
    /// whitespace is ignored and an empty cell reads as zero.
    pub fn parse(text: &str) -> Self {
        let t = text.trim();
        if t.is_empty() {
            return Reading::Valid(0.0);
        }
        match t.parse::<f64>() {
            Ok(v) if !v.is_nan() => Reading::Valid(v),
            _ => Reading::Invalid,
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Reading::Valid(v) => Some(v),
            Reading::Invalid => None,
        }
    }

    /// Display-safe value: invalid readings render as zero.
    pub fn value_or_zero(self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Reading::Valid(_))
    }
}

impl From<f64> for Reading {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            Reading::Invalid
        } else {
            Reading::Valid(v)
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Valid(v) => write!(f, "{v:.1}"),
            Reading::Invalid => write!(f, "<invalid>"),
        }
    }
}

/// What a reducer does when one of its inputs is [`Reading::Invalid`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPolicy {
    /// Any invalid input makes the whole reduction invalid.
    #[default]
    Propagate,
    /// Invalid inputs are ignored; the reduction runs over the rest.
    Skip,
}

impl InvalidPolicy {
    /// Sum of `values`. An empty input sums to zero.
    pub fn sum<I>(self, values: I) -> Reading
    where
        I: IntoIterator<Item = Reading>,
    {
        let mut total = 0.0;
        for r in values {
            match (r, self) {
                (Reading::Valid(v), _) => total += v,
                (Reading::Invalid, InvalidPolicy::Propagate) => return Reading::Invalid,
                (Reading::Invalid, InvalidPolicy::Skip) => {}
            }
        }
        Reading::Valid(total)
    }

    /// Arithmetic mean of `values`. Undefined (no usable input) is invalid.
    pub fn mean<I>(self, values: I) -> Reading
    where
        I: IntoIterator<Item = Reading>,
    {
        let mut total = 0.0;
        let mut count = 0usize;
        for r in values {
            match (r, self) {
                (Reading::Valid(v), _) => {
                    total += v;
                    count += 1;
                }
                (Reading::Invalid, InvalidPolicy::Propagate) => return Reading::Invalid,
                (Reading::Invalid, InvalidPolicy::Skip) => {}
            }
        }
        if count == 0 {
            Reading::Invalid
        } else {
            Reading::Valid(total / count as f64)
        }
    }
}

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }
}

impl FromStr for Season {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Winter" => Ok(Season::Winter),
            "Spring" => Ok(Season::Spring),
            "Summer" => Ok(Season::Summer),
            "Autumn" => Ok(Season::Autumn),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one hourly observation
// ---------------------------------------------------------------------------

/// A single normalized hourly observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawRecord {
    /// Calendar day; the grouping key for every daily view.
    pub date: NaiveDate,
    /// Hour of day, expected 0–23.
    pub hour: Reading,
    pub rented_count: Reading,
    pub temperature: Reading,
    pub humidity: Reading,
    pub wind_speed: Reading,
    pub visibility: Reading,
    pub dew_point: Reading,
    pub solar_radiation: Reading,
    pub rainfall: Reading,
    pub snowfall: Reading,
    /// `None` when the season label was not recognised.
    pub season: Option<Season>,
}

impl RawRecord {
    /// The hour slot 0–23 this record falls in, if its hour is a whole
    /// number in range.
    pub fn hour_slot(&self) -> Option<usize> {
        let h = self.hour.value()?;
        if h.fract() == 0.0 && (0.0..24.0).contains(&h) {
            Some(h as usize)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// DailyAggregate – one calendar day
// ---------------------------------------------------------------------------

/// Reduction of all hourly records sharing one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Always strictly positive for aggregates in a [`DailySeries`].
    pub total_rentals: f64,
    pub mean_temperature: Reading,
    pub mean_humidity: Reading,
    pub mean_wind_speed: Reading,
    pub mean_solar_radiation: Reading,
    pub total_rainfall: Reading,
    pub season: Option<Season>,
}

// ---------------------------------------------------------------------------
// DailySeries – the canonical daily view and its axis domains
// ---------------------------------------------------------------------------

/// The canonical, date-sorted daily sequence computed once at load time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DailySeries {
    pub days: Vec<DailyAggregate>,
    /// First and last date, `None` when empty.
    pub date_extent: Option<(NaiveDate, NaiveDate)>,
    /// Min and max total rentals, `None` when empty.
    pub rentals_extent: Option<(f64, f64)>,
}

impl DailySeries {
    /// Wrap an already date-sorted list and compute its axis domains.
    pub fn new(days: Vec<DailyAggregate>) -> Self {
        let date_extent = match (days.first(), days.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        };
        let rentals_extent = days.iter().map(|d| d.total_rentals).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        });
        DailySeries {
            days,
            date_extent,
            rentals_extent,
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_parse() {
        assert_eq!(Reading::parse(" 12.5 "), Reading::Valid(12.5));
        assert_eq!(Reading::parse(""), Reading::Valid(0.0));
        assert_eq!(Reading::parse("abc"), Reading::Invalid);
        assert_eq!(Reading::parse("NaN"), Reading::Invalid);
    }

    #[test]
    fn test_policy_propagate_poisons() {
        let values = [Reading::Valid(1.0), Reading::Invalid, Reading::Valid(3.0)];
        assert_eq!(InvalidPolicy::Propagate.sum(values), Reading::Invalid);
        assert_eq!(InvalidPolicy::Propagate.mean(values), Reading::Invalid);
    }

    #[test]
    fn test_policy_skip_ignores_invalid() {
        let values = [Reading::Valid(1.0), Reading::Invalid, Reading::Valid(3.0)];
        assert_eq!(InvalidPolicy::Skip.sum(values), Reading::Valid(4.0));
        assert_eq!(InvalidPolicy::Skip.mean(values), Reading::Valid(2.0));
    }

    #[test]
    fn test_empty_mean_is_invalid_empty_sum_is_zero() {
        assert_eq!(InvalidPolicy::Skip.mean(Vec::new()), Reading::Invalid);
        assert_eq!(InvalidPolicy::Propagate.sum(Vec::new()), Reading::Valid(0.0));
    }

    #[test]
    fn test_season_from_str() {
        assert_eq!("Summer".parse::<Season>(), Ok(Season::Summer));
        assert!("Monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn test_series_extents() {
        let day = |d: u32, total: f64| DailyAggregate {
            date: NaiveDate::from_ymd_opt(2018, 1, d).unwrap(),
            total_rentals: total,
            mean_temperature: Reading::Valid(0.0),
            mean_humidity: Reading::Valid(0.0),
            mean_wind_speed: Reading::Valid(0.0),
            mean_solar_radiation: Reading::Valid(0.0),
            total_rainfall: Reading::Valid(0.0),
            season: None,
        };
        let series = DailySeries::new(vec![day(1, 50.0), day(2, 10.0), day(3, 30.0)]);
        assert_eq!(series.rentals_extent, Some((10.0, 50.0)));
        assert_eq!(
            series.date_extent,
            Some((
                NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2018, 1, 3).unwrap()
            ))
        );
        assert!(DailySeries::new(Vec::new()).rentals_extent.is_none());
    }
}
