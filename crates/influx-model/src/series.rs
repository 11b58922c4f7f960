//! Aggregated views consumed by charts and tables.

use serde::{Deserialize, Serialize};

use crate::Quarter;

/// Summed patient count for one (year, quarter) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: String,
    pub quarter: Quarter,
    pub patients: f64,
}

/// Per-quarter totals for one department, ordered by year then quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub department: String,
    pub points: Vec<SeriesPoint>,
}

impl AggregatedSeries {
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.patients).sum()
    }

    pub fn get(&self, year: &str, quarter: Quarter) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.year == year && p.quarter == quarter)
            .map(|p| p.patients)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Headline statistics for the selected department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub total_patients: f64,
    pub distinct_years: usize,
    pub row_count: usize,
}

/// One line of the department list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentOverview {
    pub department: String,
    pub row_count: usize,
    pub total_patients: f64,
}

/// Year-by-quarter grid. Missing combinations hold 0 for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub department: String,
    pub rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub year: String,
    pub quarters: [f64; 4],
}

impl PivotRow {
    pub fn value(&self, quarter: Quarter) -> f64 {
        self.quarters[quarter.index()]
    }

    pub fn total(&self) -> f64 {
        self.quarters.iter().sum()
    }
}
