use influx_model::ErrorKind;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("no data for department '{department}'")]
    NoDataForDepartment { department: String },
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoDataForDepartment { .. } => ErrorKind::EmptyResult,
        }
    }
}
