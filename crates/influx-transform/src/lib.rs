//! Value normalization for patient influx tables.
//!
//! - **normalization**: cell-level coercions (counts, quarters, years, departments)
//! - **normalize**: the table-level pass that selects mapped columns and drops
//!   rows whose values do not coerce

pub mod error;
pub mod normalization;
pub mod normalize;

pub use error::NormalizeError;
pub use normalization::{
    canonicalize_quarter, coerce_count, department_token, parse_count_text, parse_quarter,
    year_token,
};
pub use normalize::normalize_table;
