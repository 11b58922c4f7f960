//! Error types for mapping operations.

use influx_model::{ErrorKind, LogicalField};
use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Fields still unresolved after detection and manual resolution.
    #[error("missing required fields: {}", join_fields(.missing))]
    MissingFields {
        missing: Vec<LogicalField>,
        /// Every raw column, so the caller can offer them for remapping.
        available: Vec<String>,
    },
    /// Selected column does not exist in the input.
    #[error("column '{column}' not found (selected for {field})")]
    ColumnNotFound { field: LogicalField, column: String },
    /// Column already bound to another field in exclusive mode.
    #[error("column '{column}' already mapped to another field (requested for {field})")]
    ColumnAlreadyUsed { field: LogicalField, column: String },
    /// Token override file could not be used.
    #[error("invalid field patterns: {0}")]
    InvalidPatterns(String),
    /// The caller failed to answer a resolution request.
    #[error("resolver failed: {0}")]
    Resolver(String),
}

impl MappingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPatterns(_) => ErrorKind::FileParse,
            _ => ErrorKind::MissingField,
        }
    }
}

fn join_fields(fields: &[LogicalField]) -> String {
    fields
        .iter()
        .map(LogicalField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_labels() {
        let err = MappingError::MissingFields {
            missing: vec![LogicalField::Quarter, LogicalField::PatientCount],
            available: vec!["A".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required fields: Quarter, No. of Patients"
        );
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }
}
