use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use super::daily::group_by_day;
use super::model::{InvalidPolicy, RawRecord, Reading};

// ---------------------------------------------------------------------------
// Weather factors correlated against daily rentals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Factor {
    Temperature,
    Humidity,
    WindSpeed,
    Visibility,
    SolarRadiation,
    Rainfall,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::Temperature,
        Factor::Humidity,
        Factor::WindSpeed,
        Factor::Visibility,
        Factor::SolarRadiation,
        Factor::Rainfall,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Factor::Temperature => "Temperature",
            Factor::Humidity => "Humidity",
            Factor::WindSpeed => "Wind speed",
            Factor::Visibility => "Visibility",
            Factor::SolarRadiation => "Solar Radiation",
            Factor::Rainfall => "Rainfall",
        }
    }

    fn value(self, day: &DailyMetrics) -> Reading {
        match self {
            Factor::Temperature => day.temperature,
            Factor::Humidity => day.humidity,
            Factor::WindSpeed => day.wind_speed,
            Factor::Visibility => day.visibility,
            Factor::SolarRadiation => day.solar_radiation,
            Factor::Rainfall => day.rainfall,
        }
    }
}

// ---------------------------------------------------------------------------
// Daily re-aggregation on the wider metric set
// ---------------------------------------------------------------------------

/// One day of the wider metric set used for correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub total_rentals: Reading,
    pub temperature: Reading,
    pub humidity: Reading,
    pub wind_speed: Reading,
    pub visibility: Reading,
    pub dew_point: Reading,
    pub solar_radiation: Reading,
    pub rainfall: Reading,
}

/// Group `records` by day. Unlike the daily series, zero-activity days
/// are kept.
pub fn daily_metrics(records: &[RawRecord], policy: InvalidPolicy) -> Vec<DailyMetrics> {
    group_by_day(records)
        .into_iter()
        .map(|(date, group)| DailyMetrics {
            date,
            total_rentals: policy.sum(group.iter().map(|r| r.rented_count)),
            temperature: policy.mean(group.iter().map(|r| r.temperature)),
            humidity: policy.mean(group.iter().map(|r| r.humidity)),
            wind_speed: policy.mean(group.iter().map(|r| r.wind_speed)),
            visibility: policy.mean(group.iter().map(|r| r.visibility)),
            dew_point: policy.mean(group.iter().map(|r| r.dew_point)),
            solar_radiation: policy.mean(group.iter().map(|r| r.solar_radiation)),
            rainfall: policy.sum(group.iter().map(|r| r.rainfall)),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Pearson correlation of two equal-length series.
///
/// `None` for fewer than two points, mismatched lengths, zero variance in
/// either series, or non-finite input.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    let r = cov / (var_x * var_y).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationEntry {
    pub factor: Factor,
    /// `None` when no correlation is available for this subset.
    pub coefficient: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrelationRanking {
    /// One entry per factor, in [`Factor::ALL`] order.
    pub entries: Vec<CorrelationEntry>,
    /// Strongest factors by absolute coefficient, strongest first.
    pub dominant: Vec<Factor>,
}

impl CorrelationRanking {
    /// `"Temperature, Solar Radiation"`, or `"unavailable"`.
    pub fn dominant_label(&self) -> String {
        if self.dominant.is_empty() {
            return "unavailable".to_string();
        }
        self.dominant
            .iter()
            .map(|f| f.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn coefficient(&self, factor: Factor) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.factor == factor)
            .and_then(|e| e.coefficient)
    }
}

/// Correlate each weather factor with daily rentals over `records` and pick
/// the `top_n` strongest.
pub fn rank_factors(records: &[RawRecord], policy: InvalidPolicy, top_n: usize) -> CorrelationRanking {
    let days = daily_metrics(records, policy);
    if days.len() < 2 {
        return CorrelationRanking {
            entries: Factor::ALL
                .iter()
                .map(|&factor| CorrelationEntry {
                    factor,
                    coefficient: None,
                })
                .collect(),
            dominant: Vec::new(),
        };
    }

    // Invalid readings become NaN here so `pearson` reports them unavailable.
    let rentals: Vec<f64> = days
        .iter()
        .map(|d| d.total_rentals.value().unwrap_or(f64::NAN))
        .collect();

    let entries: Vec<CorrelationEntry> = Factor::ALL
        .iter()
        .map(|&factor| {
            let xs: Vec<f64> = days
                .iter()
                .map(|d| factor.value(d).value().unwrap_or(f64::NAN))
                .collect();
            CorrelationEntry {
                factor,
                coefficient: pearson(&xs, &rentals),
            }
        })
        .collect();

    let mut available: Vec<(Factor, f64)> = entries
        .iter()
        .filter_map(|e| e.coefficient.map(|c| (e.factor, c)))
        .collect();
    // Stable: ties keep factor order.
    available.sort_by(|a, b| b.1.abs().partial_cmp(&a.1.abs()).unwrap_or(Ordering::Equal));

    let dominant = available.into_iter().take(top_n).map(|(f, _)| f).collect();

    CorrelationRanking { entries, dominant }
}
