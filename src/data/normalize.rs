use chrono::NaiveDate;

use super::model::{RawRecord, RawRow, Reading};
use crate::error::RowError;

// ---------------------------------------------------------------------------
// Column names of the hourly rental table
// ---------------------------------------------------------------------------

pub mod columns {
    pub const DATE: &str = "Date";
    pub const RENTED_COUNT: &str = "Rented Bike Count";
    pub const HOUR: &str = "Hour";
    pub const TEMPERATURE: &str = "Temperature";
    pub const HUMIDITY: &str = "Humidity";
    pub const WIND_SPEED: &str = "Wind speed";
    pub const VISIBILITY: &str = "Visibility";
    pub const DEW_POINT: &str = "Dew point temperature";
    pub const SOLAR_RADIATION: &str = "Solar Radiation";
    pub const RAINFALL: &str = "Rainfall";
    pub const SNOWFALL: &str = "Snowfall";
    pub const SEASON: &str = "Seasons";

    /// Every column the normalizer reads, in file order.
    pub const ALL: [&str; 12] = [
        DATE,
        RENTED_COUNT,
        HOUR,
        TEMPERATURE,
        HUMIDITY,
        WIND_SPEED,
        VISIBILITY,
        DEW_POINT,
        SOLAR_RADIATION,
        RAINFALL,
        SNOWFALL,
        SEASON,
    ];
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Counts of rows kept and dropped by [`normalize_rows`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub kept: usize,
    pub dropped: usize,
}

/// Parse `day/month/year` text into a calendar date.
///
/// Out-of-range parts are rejected rather than rolled over: `31/02/2018` is
/// `None`, not 3 March, so such rows are dropped by [`normalize_row`].
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Turn one raw row into a typed record.
///
/// Only the date can reject a row; numeric cells that do not parse (or are
/// missing) become [`Reading::Invalid`].
pub fn normalize_row(row_no: usize, row: &RawRow) -> Result<RawRecord, RowError> {
    let date_text = row.get(columns::DATE).ok_or(RowError::MissingDate {
        row: row_no,
        column: columns::DATE,
    })?;
    let date = parse_date(date_text).ok_or_else(|| RowError::UnparsableDate {
        row: row_no,
        text: date_text.clone(),
    })?;

    let num = |col: &str| row.get(col).map_or(Reading::Invalid, |t| Reading::parse(t));

    Ok(RawRecord {
        date,
        hour: num(columns::HOUR),
        rented_count: num(columns::RENTED_COUNT),
        temperature: num(columns::TEMPERATURE),
        humidity: num(columns::HUMIDITY),
        wind_speed: num(columns::WIND_SPEED),
        visibility: num(columns::VISIBILITY),
        dew_point: num(columns::DEW_POINT),
        solar_radiation: num(columns::SOLAR_RADIATION),
        rainfall: num(columns::RAINFALL),
        snowfall: num(columns::SNOWFALL),
        season: row.get(columns::SEASON).and_then(|s| s.parse().ok()),
    })
}

/// Normalize every row, dropping those without a usable date.
/// Input order is preserved.
pub fn normalize_rows(rows: &[RawRow]) -> (Vec<RawRecord>, NormalizeReport) {
    let mut records = Vec::with_capacity(rows.len());
    let mut report = NormalizeReport::default();

    for (row_no, row) in rows.iter().enumerate() {
        match normalize_row(row_no, row) {
            Ok(rec) => {
                records.push(rec);
                report.kept += 1;
            }
            Err(e) => {
                log::debug!("dropping row: {e}");
                report.dropped += 1;
            }
        }
    }

    if report.dropped > 0 {
        log::warn!(
            "{} of {} rows dropped for unparsable dates",
            report.dropped,
            rows.len()
        );
    }

    (records, report)
}
