//! Data model for the patient influx pipeline.
//!
//! - **field**: the four logical fields every input must provide
//! - **quarter**: canonical quarters and their ordering
//! - **mapping**: raw column assignments and resolver selections
//! - **row**: normalized rows and drop diagnostics
//! - **series**: aggregated series, summaries and the pivot view
//! - **options**: matching and normalization knobs

pub mod error;
pub mod field;
pub mod mapping;
pub mod options;
pub mod quarter;
pub mod row;
pub mod series;

pub use error::{ErrorKind, ModelError, Result};
pub use field::LogicalField;
pub use mapping::{ColumnMapping, FieldMatch, NONE_LABEL, ResolvedMapping, Selection};
pub use options::{MatchMode, MatchOptions, NormalizeOptions, YearMode};
pub use quarter::Quarter;
pub use row::{NormalizedRow, NormalizedTable};
pub use series::{
    AggregatedSeries, DepartmentOverview, DepartmentSummary, PivotRow, PivotTable, SeriesPoint,
};
