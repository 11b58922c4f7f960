//! (Year, Quarter) grouping for one department.

use std::collections::BTreeMap;

use influx_model::{AggregatedSeries, NormalizedTable, Quarter, SeriesPoint};
use tracing::debug;

use crate::error::ReportError;

/// Sums patient counts per (year, quarter) for rows of `department`.
///
/// Department matching is exact. Points come back ordered by year (string
/// order) and then quarter. A department with no rows is an error rather
/// than an empty series.
pub fn aggregate(
    table: &NormalizedTable,
    department: &str,
) -> Result<AggregatedSeries, ReportError> {
    let mut groups: BTreeMap<(&str, Quarter), f64> = BTreeMap::new();
    let mut matched = 0usize;
    for row in table.rows_for(department) {
        *groups.entry((row.year.as_str(), row.quarter)).or_insert(0.0) += row.patients;
        matched += 1;
    }

    if matched == 0 {
        return Err(ReportError::NoDataForDepartment {
            department: department.to_string(),
        });
    }

    debug!(department, rows = matched, points = groups.len(), "aggregated department");

    let points = groups
        .into_iter()
        .map(|((year, quarter), patients)| SeriesPoint {
            year: year.to_string(),
            quarter,
            patients,
        })
        .collect();

    Ok(AggregatedSeries {
        department: department.to_string(),
        points,
    })
}
