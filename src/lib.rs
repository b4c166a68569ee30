//! Bike rental explorer: daily aggregation of hourly rental records and
//! brush-scoped hourly, weather and correlation views.

pub mod config;
pub mod data;
pub mod error;
