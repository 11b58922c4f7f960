//! Column mapping for patient influx data.
//!
//! Resolution is two-phase. [`ColumnMatcher`] binds logical fields to raw
//! columns using substring tokens and reports what it could not find. The
//! resolver then merges answers supplied by the caller for the remaining
//! fields and freezes the result once all four fields are bound.

mod error;
mod matcher;
mod patterns;
mod resolver;

pub use error::MappingError;
pub use matcher::{ColumnMatcher, MatchOutcome, detect_columns};
pub use patterns::{FieldPatterns, normalize_column_name};
pub use resolver::{
    FieldResolver, ResolutionRequest, ScriptedResolver, apply_overrides, freeze,
    merge_selections, resolution_requests, resolve_with,
};
