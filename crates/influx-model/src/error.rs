use thiserror::Error;

use crate::LogicalField;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown field: {0}")]
    InvalidField(String),
    #[error("not a canonical quarter: {0}")]
    InvalidQuarter(String),
    #[error("column '{column}' does not exist (requested for {field})")]
    UnknownColumn { field: LogicalField, column: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Coarse classification shared by every pipeline error.
///
/// Callers use it to tell a hard failure apart from a blocking mapping
/// state or an empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input could not be read as tabular data.
    FileParse,
    /// One or more logical fields are still unresolved.
    MissingField,
    /// Value coercion failed for the whole table.
    Coercion,
    /// Processing succeeded but left nothing to show.
    EmptyResult,
}

impl ErrorKind {
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::FileParse => "input is not readable as tabular data",
            Self::MissingField => "required fields are not mapped",
            Self::Coercion => "values could not be normalized",
            Self::EmptyResult => "no usable data",
        }
    }

    /// True for states the caller fixes by re-mapping rather than re-uploading.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::MissingField)
    }
}
