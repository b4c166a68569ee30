use std::path::PathBuf;

use thiserror::Error;

/// Why a raw row could not become a [`crate::data::model::RawRecord`].
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("row {row}: missing '{column}' column")]
    MissingDate { row: usize, column: &'static str },
    #[error("row {row}: '{text}' is not a day/month/year date")]
    UnparsableDate { row: usize, text: String },
}

/// Failure to read the engine configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("dominant_factor_count must be at least 1")]
    NoDominantFactors,
}
