use serde::Serialize;

use super::model::{DailyAggregate, InvalidPolicy, Reading};

// ---------------------------------------------------------------------------
// Tracked weather metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Statistic {
    Mean,
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Temperature,
    Humidity,
    WindSpeed,
    SolarRadiation,
    Rainfall,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::WindSpeed,
        Metric::SolarRadiation,
        Metric::Rainfall,
    ];

    /// Rainfall accumulates; everything else is an intensive quantity.
    pub fn statistic(self) -> Statistic {
        match self {
            Metric::Rainfall => Statistic::Sum,
            _ => Statistic::Mean,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature (℃)",
            Metric::Humidity => "Humidity (%)",
            Metric::WindSpeed => "Wind Speed (m/s)",
            Metric::SolarRadiation => "Solar Radiation",
            Metric::Rainfall => "Rainfall (mm)",
        }
    }

    /// Label drawn next to the reference line.
    pub fn reference_label(self) -> &'static str {
        match self.statistic() {
            Statistic::Mean => "Avg",
            Statistic::Sum => "Sum",
        }
    }

    /// This metric's daily value.
    pub fn daily_value(self, day: &DailyAggregate) -> Reading {
        match self {
            Metric::Temperature => day.mean_temperature,
            Metric::Humidity => day.mean_humidity,
            Metric::WindSpeed => day.mean_wind_speed,
            Metric::SolarRadiation => day.mean_solar_radiation,
            Metric::Rainfall => day.total_rainfall,
        }
    }

    /// Reduce daily values with this metric's statistic.
    fn reduce(self, days: &[DailyAggregate], policy: InvalidPolicy) -> Reading {
        let values = days.iter().map(|d| self.daily_value(d));
        match self.statistic() {
            Statistic::Mean => policy.mean(values),
            Statistic::Sum => policy.sum(values),
        }
    }
}

// ---------------------------------------------------------------------------
// Global reference, computed once from the full series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricReference {
    pub metric: Metric,
    /// Global mean, or global total for rainfall.
    pub reference: f64,
    /// Axis ceiling: global max, or 1.1 × global total for rainfall.
    pub axis_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalReference {
    pub metrics: Vec<MetricReference>,
}

impl GlobalReference {
    pub fn from_daily(days: &[DailyAggregate], policy: InvalidPolicy) -> Self {
        let metrics = Metric::ALL
            .iter()
            .map(|&metric| {
                let reference = metric.reduce(days, policy).value_or_zero();
                let axis_max = match metric.statistic() {
                    Statistic::Sum => reference * 1.1,
                    Statistic::Mean => days
                        .iter()
                        .filter_map(|d| metric.daily_value(d).value())
                        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
                        .unwrap_or(0.0),
                };
                MetricReference {
                    metric,
                    reference,
                    axis_max,
                }
            })
            .collect();
        GlobalReference { metrics }
    }

    pub fn get(&self, metric: Metric) -> Option<&MetricReference> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

// ---------------------------------------------------------------------------
// Per-selection summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    /// Mean or sum over the subset; 0 when undefined.
    pub value: f64,
    pub reference: f64,
    pub axis_max: f64,
}

/// One summary per tracked metric, paired with its fixed global reference.
pub fn summarize(
    days: &[DailyAggregate],
    global: &GlobalReference,
    policy: InvalidPolicy,
) -> Vec<MetricSummary> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let (reference, axis_max) = global
                .get(metric)
                .map_or((0.0, 0.0), |r| (r.reference, r.axis_max));
            MetricSummary {
                metric,
                value: metric.reduce(days, policy).value_or_zero(),
                reference,
                axis_max,
            }
        })
        .collect()
}
