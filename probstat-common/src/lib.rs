pub mod config;
pub use config::{Config, DisplayConfig, HistogramConfig, LoggingConfig, SimulationConfig};

use thiserror::Error;

/// Inclusive lower bound of the simulation trial count.
pub const MIN_TRIALS: u32 = 1;
/// Inclusive upper bound of the simulation trial count.
pub const MAX_TRIALS: u32 = 10_000;
pub const DEFAULT_TRIALS: u32 = 1_000;
pub const DEFAULT_BINS: usize = 30;

#[derive(Error, Debug)]
pub enum ProbStatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("The column name '{0}' does not exist in the data.")]
    ColumnNotFound(String),
    #[error("The column '{column}' is not numeric (row {row}: '{value}')")]
    NonNumericColumn {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Expected {expected} fields in row {row}, saw {found}")]
    TooManyFields {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("No columns to parse from file")]
    EmptyDataset,
    #[error("Unsupported upload '{0}': only .csv files are accepted")]
    UnsupportedUpload(String),
    #[error("Number of trials must be between {min} and {max}, got {value}")]
    TrialsOutOfRange { value: i64, min: u32, max: u32 },
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ProbStatError>;
