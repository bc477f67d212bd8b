use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load errors – fatal for the session that requested the load
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unreadable parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("row {row} is not a JSON object")]
    NotAnObject { row: usize },

    #[error("row {row} is missing required columns: {}", .columns.join(", "))]
    MissingColumns { row: usize, columns: Vec<String> },

    #[error("row {row}, column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("dataset contains no player records")]
    Empty,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Statistic lookup
// ---------------------------------------------------------------------------

/// Raised when free text does not name one of the recognised statistics.
///
/// Only reachable at the parsing boundary; the core takes a closed
/// [`Statistic`](crate::data::model::Statistic) and cannot see it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown statistic column '{0}'")]
pub struct UnknownColumnError(pub String);
