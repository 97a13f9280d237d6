use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unreadable table {path}: {details}")]
    UnreadableTable { path: PathBuf, details: String },

    #[error("Row {line} of {path} has {found} fields, but the header has {expected}")]
    RaggedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Table {0} has no header row")]
    NoColumns(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Why an autoregressive fit was rejected. Never escapes the forecaster as an
/// error; it rides along inside `ForecastOutcome::Fallback`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("Insufficient data: need at least {required} observations, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Degenerate series: values have zero variance")]
    DegenerateSeries,

    #[error("AR model failed: {0}")]
    Model(String),

    #[error("Estimate is not finite")]
    NonFinite,
}
