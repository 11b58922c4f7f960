//! Summary statistics and the cross-department overview.

use std::collections::{BTreeMap, BTreeSet};

use influx_model::{
    AggregatedSeries, DepartmentOverview, DepartmentSummary, NormalizedTable, PivotTable,
};
use serde::Serialize;
use tracing::info;

use crate::aggregate::aggregate;
use crate::error::ReportError;
use crate::pivot::pivot;

/// Everything shown for one selected department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentReport {
    pub summary: DepartmentSummary,
    pub series: AggregatedSeries,
    pub pivot: PivotTable,
}

/// Total patients, distinct years and row count for `department`.
pub fn summarize(
    table: &NormalizedTable,
    department: &str,
) -> Result<DepartmentSummary, ReportError> {
    let mut years = BTreeSet::new();
    let mut total_patients = 0.0;
    let mut row_count = 0usize;
    for row in table.rows_for(department) {
        years.insert(row.year.as_str());
        total_patients += row.patients;
        row_count += 1;
    }

    if row_count == 0 {
        return Err(ReportError::NoDataForDepartment {
            department: department.to_string(),
        });
    }

    Ok(DepartmentSummary {
        department: department.to_string(),
        total_patients,
        distinct_years: years.len(),
        row_count,
    })
}

/// One entry per department, sorted by name.
pub fn department_overview(table: &NormalizedTable) -> Vec<DepartmentOverview> {
    let mut departments: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for row in &table.rows {
        let entry = departments.entry(row.department.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += row.patients;
    }

    departments
        .into_iter()
        .map(|(department, (row_count, total_patients))| DepartmentOverview {
            department: department.to_string(),
            row_count,
            total_patients,
        })
        .collect()
}

/// Series, summary and pivot for `department`.
pub fn build_report(
    table: &NormalizedTable,
    department: &str,
) -> Result<DepartmentReport, ReportError> {
    let series = aggregate(table, department)?;
    let summary = summarize(table, department)?;
    let pivot = pivot(&series);

    info!(
        department,
        rows = summary.row_count,
        points = series.len(),
        total = summary.total_patients,
        "built department report"
    );

    Ok(DepartmentReport {
        summary,
        series,
        pivot,
    })
}
