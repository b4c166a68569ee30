//! Builders shared by the unit tests of the data layer.

use chrono::NaiveDate;

use super::model::{DailyAggregate, RawRecord, Reading};

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 1, day).unwrap()
}

/// An hourly record on 2018-01-`day` with every weather reading at zero.
pub fn record(day: u32, hour: u32, rented: f64) -> RawRecord {
    RawRecord {
        date: date(day),
        hour: Reading::Valid(hour as f64),
        rented_count: Reading::Valid(rented),
        temperature: Reading::Valid(0.0),
        humidity: Reading::Valid(0.0),
        wind_speed: Reading::Valid(0.0),
        visibility: Reading::Valid(0.0),
        dew_point: Reading::Valid(0.0),
        solar_radiation: Reading::Valid(0.0),
        rainfall: Reading::Valid(0.0),
        snowfall: Reading::Valid(0.0),
        season: None,
    }
}

/// A daily aggregate on 2018-01-`day` with every weather reading at zero.
pub fn daily(day: u32, total_rentals: f64) -> DailyAggregate {
    DailyAggregate {
        date: date(day),
        total_rentals,
        mean_temperature: Reading::Valid(0.0),
        mean_humidity: Reading::Valid(0.0),
        mean_wind_speed: Reading::Valid(0.0),
        mean_solar_radiation: Reading::Valid(0.0),
        total_rainfall: Reading::Valid(0.0),
        season: None,
    }
}
