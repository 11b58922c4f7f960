//! Logical fields required by the pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// One of the four data roles every input table must provide.
///
/// Variant order is the matcher's iteration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    Year,
    Quarter,
    Department,
    PatientCount,
}

impl LogicalField {
    /// All fields in matching order.
    pub const ALL: [LogicalField; 4] = [
        LogicalField::Year,
        LogicalField::Quarter,
        LogicalField::Department,
        LogicalField::PatientCount,
    ];

    /// Human-facing label used in prompts and reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::Quarter => "Quarter",
            Self::Department => "Department",
            Self::PatientCount => "No. of Patients",
        }
    }

    /// Stable machine key (`--map year=...`).
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Quarter => "quarter",
            Self::Department => "department",
            Self::PatientCount => "patient_count",
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogicalField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "year" | "yr" => Ok(Self::Year),
            "quarter" | "qtr" => Ok(Self::Quarter),
            "department" | "dept" => Ok(Self::Department),
            "patientcount" | "patients" | "count" | "noofpatients" => Ok(Self::PatientCount),
            _ => Err(ModelError::InvalidField(s.to_string())),
        }
    }
}
