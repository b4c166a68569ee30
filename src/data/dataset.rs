use serde::Serialize;

use super::correlation::{rank_factors, CorrelationRanking};
use super::daily::aggregate_daily;
use super::hourly::{profile_hours, HourlyProfile};
use super::model::{DailyAggregate, DailySeries, RawRecord, RawRow};
use super::normalize::{normalize_rows, NormalizeReport};
use super::selection::{apply_selection, BrushPeriod, Projection, Selection};
use super::summary::{summarize, GlobalReference, MetricSummary};
use crate::config::EngineConfig;

// ---------------------------------------------------------------------------
// Dataset – everything computed once at load time
// ---------------------------------------------------------------------------

/// Read-only session state: records, canonical daily series and the fixed
/// global references.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<RawRecord>,
    pub daily: DailySeries,
    pub global: GlobalReference,
    pub report: NormalizeReport,
    pub config: EngineConfig,
}

impl Dataset {
    pub fn from_rows(rows: &[RawRow], config: &EngineConfig) -> Self {
        let (records, report) = normalize_rows(rows);
        Self::from_records(records, report, config)
    }

    pub fn from_records(records: Vec<RawRecord>, report: NormalizeReport, config: &EngineConfig) -> Self {
        let daily = aggregate_daily(&records, config.invalid_policy);
        let global = GlobalReference::from_daily(&daily.days, config.invalid_policy);
        log::info!(
            "dataset ready: {} records, {} active days ({} rows dropped)",
            records.len(),
            daily.len(),
            report.dropped
        );
        Dataset {
            records,
            daily,
            global,
            report,
            config: config.clone(),
        }
    }

    /// Run one full recomputation for `selection`.
    pub fn recompute<P>(&self, projection: &P, selection: &Selection) -> SelectionViews
    where
        P: Projection + ?Sized,
    {
        let policy = self.config.invalid_policy;
        let selected = apply_selection(&self.daily.days, &self.records, projection, selection);

        let hourly = profile_hours(&selected.records, policy);
        let metrics = summarize(&selected.daily, &self.global, policy);
        let correlation = rank_factors(&selected.records, policy, self.config.dominant_factor_count);
        let period = BrushPeriod::from_selection(selection, &selected.daily);

        log::debug!(
            "recomputed views: {} days, {} records selected",
            selected.daily.len(),
            selected.records.len()
        );

        SelectionViews {
            daily: selected.daily,
            records: selected.records,
            hourly,
            metrics,
            correlation,
            period,
        }
    }

    /// Views over the whole dataset.
    pub fn full_views(&self) -> SelectionViews {
        let unused = |_: &DailyAggregate| -> [f64; 2] { [0.0, 0.0] };
        self.recompute(&unused, &Selection::None)
    }
}

// ---------------------------------------------------------------------------
// SelectionViews – output of one recomputation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionViews {
    pub daily: Vec<DailyAggregate>,
    pub records: Vec<RawRecord>,
    pub hourly: HourlyProfile,
    pub metrics: Vec<MetricSummary>,
    pub correlation: CorrelationRanking,
    pub period: Option<BrushPeriod>,
}

// ---------------------------------------------------------------------------
// ViewSlot – last-write-wins holder for the current views
// ---------------------------------------------------------------------------

/// Holds the latest published views. Each selection event takes a new
/// generation; results from an older generation are discarded.
#[derive(Debug, Default)]
pub struct ViewSlot {
    issued: u64,
    published: Option<u64>,
    /// Generations up to and including this one were issued before the last
    /// `clear` and are never published.
    retired: u64,
    views: Option<SelectionViews>,
}

impl ViewSlot {
    /// Register a new selection event and return its generation.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Store `views` unless a newer generation has already been published.
    /// Returns whether the views were accepted.
    pub fn publish(&mut self, generation: u64, views: SelectionViews) -> bool {
        if generation <= self.retired || self.published.is_some_and(|p| generation < p) {
            log::debug!("discarding stale views from generation {generation}");
            return false;
        }
        self.published = Some(generation);
        self.views = Some(views);
        true
    }

    pub fn current(&self) -> Option<&SelectionViews> {
        self.views.as_ref()
    }

    /// Drop the current views. Results of events issued so far are
    /// discarded when they arrive.
    pub fn clear(&mut self) {
        self.retired = self.issued;
        self.views = None;
    }
}
