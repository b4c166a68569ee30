/// Data layer: core types, loading, aggregation and selection-scoped views.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  text → RawRecord, drop undated rows
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  daily   │  group by day → DailySeries (once, at load)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ selection │  brush rectangle → selected days + their records
///   └───────────┘
///        │
///        ├──────────────┬───────────────┐
///        ▼              ▼               ▼
///   ┌────────┐    ┌─────────┐    ┌─────────────┐
///   │ hourly │    │ summary │    │ correlation │
///   └────────┘    └─────────┘    └─────────────┘
/// ```
///
/// `dataset` bundles the load-time state and runs one recomputation pass.

pub mod correlation;
pub mod daily;
pub mod dataset;
pub mod format;
pub mod hourly;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod selection;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;
