use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::{DailyAggregate, DailySeries, InvalidPolicy, RawRecord, Reading};

/// Group records by calendar day, keeping dataset order inside each group.
/// Keys iterate in ascending date order.
pub fn group_by_day<'a, I>(records: I) -> BTreeMap<NaiveDate, Vec<&'a RawRecord>>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut groups: BTreeMap<NaiveDate, Vec<&RawRecord>> = BTreeMap::new();
    for rec in records {
        groups.entry(rec.date).or_default().push(rec);
    }
    groups
}

/// Reduce one day's records. Returns `None` for zero-activity days
/// (a total that is not strictly positive, or not valid at all).
fn reduce_day(date: NaiveDate, group: &[&RawRecord], policy: InvalidPolicy) -> Option<DailyAggregate> {
    let total_rentals = match policy.sum(group.iter().map(|r| r.rented_count)) {
        Reading::Valid(total) if total > 0.0 => total,
        _ => return None,
    };

    Some(DailyAggregate {
        date,
        total_rentals,
        mean_temperature: policy.mean(group.iter().map(|r| r.temperature)),
        mean_humidity: policy.mean(group.iter().map(|r| r.humidity)),
        mean_wind_speed: policy.mean(group.iter().map(|r| r.wind_speed)),
        mean_solar_radiation: policy.mean(group.iter().map(|r| r.solar_radiation)),
        total_rainfall: policy.sum(group.iter().map(|r| r.rainfall)),
        // Records of one date are assumed to share a season; the first wins.
        season: group.first().and_then(|r| r.season),
    })
}

/// Build the canonical daily series from the full record set.
pub fn aggregate_daily(records: &[RawRecord], policy: InvalidPolicy) -> DailySeries {
    let groups = group_by_day(records);
    let n_days = groups.len();

    let days: Vec<DailyAggregate> = groups
        .into_iter()
        .filter_map(|(date, group)| reduce_day(date, &group, policy))
        .collect();

    log::debug!(
        "aggregated {} records into {} days ({} zero-activity days dropped)",
        records.len(),
        days.len(),
        n_days - days.len()
    );

    DailySeries::new(days)
}
