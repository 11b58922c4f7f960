use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Quarter;

/// A row that survived every coercion step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub year: String,
    pub quarter: Quarter,
    pub department: String,
    pub patients: f64,
}

/// Output of the normalizer: retained rows plus drop diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub rows: Vec<NormalizedRow>,
    /// Rows in the raw input.
    pub source_rows: usize,
    /// Rows dropped because the patient count did not parse.
    pub dropped_counts: usize,
    /// Rows dropped because the quarter was not Q1..Q4.
    pub dropped_quarters: usize,
    /// Rows dropped because the year or department cell was empty.
    pub dropped_blanks: usize,
}

impl NormalizedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct department names in sorted order.
    pub fn departments(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.department.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rows whose department equals `department` exactly.
    pub fn rows_for<'a>(&'a self, department: &'a str) -> impl Iterator<Item = &'a NormalizedRow> {
        self.rows
            .iter()
            .filter(move |row| row.department == department)
    }
}
