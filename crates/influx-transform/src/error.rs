use influx_model::{ErrorKind, LogicalField};
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("mapped column '{column}' for {field} is not in the table")]
    ColumnNotFound { field: LogicalField, column: String },
    #[error("no valid patient numbers found after conversion ({rows} rows checked in '{column}')")]
    NoValidCounts { column: String, rows: usize },
    #[error(
        "no usable rows after normalization ({source_rows} read, {dropped_counts} invalid counts, {dropped_quarters} invalid quarters, {dropped_blanks} empty years or departments)"
    )]
    NoUsableRows {
        source_rows: usize,
        dropped_counts: usize,
        dropped_quarters: usize,
        dropped_blanks: usize,
    },
    #[error("error during data preprocessing: {0}")]
    Frame(String),
}

impl NormalizeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoValidCounts { .. } | Self::NoUsableRows { .. } => ErrorKind::EmptyResult,
            Self::ColumnNotFound { .. } | Self::Frame(_) => ErrorKind::Coercion,
        }
    }
}

impl From<PolarsError> for NormalizeError {
    fn from(err: PolarsError) -> Self {
        Self::Frame(err.to_string())
    }
}
