use std::collections::BTreeMap;

use influx_model::{AggregatedSeries, PivotRow, PivotTable};

/// Lays a series out as years by Q1..Q4. Absent quarters read as 0.
pub fn pivot(series: &AggregatedSeries) -> PivotTable {
    let mut years: BTreeMap<&str, [f64; 4]> = BTreeMap::new();
    for point in &series.points {
        years.entry(point.year.as_str()).or_insert([0.0; 4])[point.quarter.index()] +=
            point.patients;
    }

    PivotTable {
        department: series.department.clone(),
        rows: years
            .into_iter()
            .map(|(year, quarters)| PivotRow {
                year: year.to_string(),
                quarters,
            })
            .collect(),
    }
}
