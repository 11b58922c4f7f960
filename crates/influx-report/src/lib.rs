//! Department-level aggregation of normalized patient rows.
//!
//! Produces the chart-ready [`AggregatedSeries`](influx_model::AggregatedSeries),
//! headline statistics, the year-by-quarter pivot and the cross-department
//! overview.

pub mod aggregate;
pub mod error;
pub mod pivot;
pub mod summary;

pub use aggregate::aggregate;
pub use error::ReportError;
pub use pivot::pivot;
pub use summary::{DepartmentReport, build_report, department_overview, summarize};
