//! Cell-level normalization functions.
//!
//! - **numeric**: patient counts with thousands separators
//! - **quarter**: free-form quarter labels to Q1..Q4
//! - **text**: year and department tokens

pub mod numeric;
pub mod quarter;
pub mod text;

pub use numeric::{coerce_count, parse_count_text};
pub use quarter::{canonicalize_quarter, parse_quarter};
pub use text::{department_token, year_token};
