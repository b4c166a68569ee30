use serde::Serialize;

use super::format::thousands;
use super::model::{InvalidPolicy, RawRecord, Reading};

pub const HOURS: usize = 24;

/// 24-hour clock → `"12 AM"`, `"7 AM"`, `"12 PM"`, `"6 PM"`.
pub fn clock_label(hour: usize) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{hour} AM"),
        12 => "12 PM".to_string(),
        h => format!("{} PM", h - 12),
    }
}

/// The hour with the highest mean rental count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakHour {
    pub hour: usize,
    pub mean_rentals: f64,
}

impl PeakHour {
    pub fn clock_label(&self) -> String {
        clock_label(self.hour)
    }
}

/// Mean rentals per hour of day over a record subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyProfile {
    /// Display-safe means: hours without data (or with an invalid mean) are 0.
    pub means: [f64; HOURS],
    pub peak: Option<PeakHour>,
}

impl HourlyProfile {
    /// Highest mean, for scaling a chart axis.
    pub fn max_mean(&self) -> f64 {
        self.peak.map_or(0.0, |p| p.mean_rentals)
    }

    /// `"Peak Hour: 6PM, Rental Average: 1,234"`, or `"unavailable"`.
    pub fn peak_label(&self) -> String {
        match self.peak {
            Some(p) => format!(
                "Peak Hour: {}, Rental Average: {}",
                p.clock_label().replace(' ', ""),
                thousands(p.mean_rentals)
            ),
            None => "unavailable".to_string(),
        }
    }
}

/// Compute the hour-of-day profile of `records`.
///
/// Ties for the peak go to the earliest hour. When no hour has a mean above
/// zero there is no peak.
pub fn profile_hours(records: &[RawRecord], policy: InvalidPolicy) -> HourlyProfile {
    let mut buckets: [Vec<Reading>; HOURS] = std::array::from_fn(|_| Vec::new());
    for rec in records {
        if let Some(h) = rec.hour_slot() {
            buckets[h].push(rec.rented_count);
        }
    }

    let means: [f64; HOURS] = std::array::from_fn(|h| {
        if buckets[h].is_empty() {
            0.0
        } else {
            policy.mean(buckets[h].iter().copied()).value_or_zero()
        }
    });

    let mut peak: Option<PeakHour> = None;
    for (hour, &mean) in means.iter().enumerate() {
        if mean > peak.map_or(0.0, |p| p.mean_rentals) {
            peak = Some(PeakHour {
                hour,
                mean_rentals: mean,
            });
        }
    }

    HourlyProfile { means, peak }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::record;

    #[test]
    fn test_clock_labels() {
        assert_eq!(clock_label(0), "12 AM");
        assert_eq!(clock_label(1), "1 AM");
        assert_eq!(clock_label(11), "11 AM");
        assert_eq!(clock_label(12), "12 PM");
        assert_eq!(clock_label(13), "1 PM");
        assert_eq!(clock_label(23), "11 PM");
    }

    #[test]
    fn test_mean_per_hour() {
        let records = vec![record(1, 8, 100.0), record(2, 8, 300.0), record(1, 9, 50.0)];
        let profile = profile_hours(&records, InvalidPolicy::Propagate);
        assert_eq!(profile.means[8], 200.0);
        assert_eq!(profile.means[9], 50.0);
        assert_eq!(profile.means[10], 0.0);
        assert_eq!(
            profile.peak,
            Some(PeakHour {
                hour: 8,
                mean_rentals: 200.0
            })
        );
        assert_eq!(profile.peak_label(), "Peak Hour: 8AM, Rental Average: 200");
    }

    #[test]
    fn test_empty_subset_is_all_zero_without_peak() {
        let profile = profile_hours(&[], InvalidPolicy::Propagate);
        assert!(profile.means.iter().all(|&m| m == 0.0));
        assert!(profile.peak.is_none());
        assert_eq!(profile.peak_label(), "unavailable");
        assert_eq!(profile.max_mean(), 0.0);
    }

    #[test]
    fn test_peak_tie_goes_to_earliest_hour() {
        let records = vec![record(1, 17, 500.0), record(1, 8, 500.0), record(1, 12, 100.0)];
        let profile = profile_hours(&records, InvalidPolicy::Propagate);
        assert_eq!(profile.peak.map(|p| p.hour), Some(8));
        assert_eq!(profile.peak_label(), "Peak Hour: 8AM, Rental Average: 500");
    }

    #[test]
    fn test_invalid_rentals_show_as_zero() {
        let mut bad = record(1, 6, 0.0);
        bad.rented_count = Reading::Invalid;
        let records = vec![record(2, 6, 40.0), bad, record(1, 7, 10.0)];

        let propagated = profile_hours(&records, InvalidPolicy::Propagate);
        assert_eq!(propagated.means[6], 0.0);
        assert_eq!(propagated.peak.map(|p| p.hour), Some(7));

        let skipped = profile_hours(&records, InvalidPolicy::Skip);
        assert_eq!(skipped.means[6], 40.0);
    }

    #[test]
    fn test_out_of_range_hours_are_ignored() {
        let mut odd = record(1, 0, 99.0);
        odd.hour = Reading::Valid(24.0);
        let mut frac = record(1, 0, 99.0);
        frac.hour = Reading::Valid(3.5);
        let profile = profile_hours(&[odd, frac], InvalidPolicy::Propagate);
        assert!(profile.peak.is_none());
    }
}
