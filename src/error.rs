use std::path::PathBuf;

use crate::workout::WorkoutKind;

/// Failures while building a session or computing its metrics
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkoutError {
    #[error("unknown workout type: {0:?}")]
    InvalidWorkoutType(String),

    #[error("{kind} expects {expected} values, got {actual}")]
    ArityMismatch {
        kind: WorkoutKind,
        expected: usize,
        actual: usize,
    },

    #[error("{kind}: {quantity} is zero, cannot divide by it")]
    DivisionByZero {
        kind: WorkoutKind,
        quantity: &'static str,
    },

    #[error("action count must be a non-negative whole number, got {0}")]
    InvalidActionCount(f64),
}

/// Failures while reading a packages file
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: line {line}: {value:?} is not a number", path.display())]
    BadNumber {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("{}: line {line}: missing workout type", path.display())]
    MissingWorkoutType { path: PathBuf, line: u64 },

    #[error("unsupported packages file {} (expected .json or .csv)", .0.display())]
    UnsupportedFormat(PathBuf),
}
