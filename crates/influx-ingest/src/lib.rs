//! Patient influx data ingestion.
//!
//! Loads a CSV upload into a Polars `DataFrame` (the raw table) with every
//! column kept as text, so later stages see the file's exact tokens.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use influx_ingest::{column_names, read_csv_table};
//!
//! let df = read_csv_table(Path::new("visits.csv"))?;
//! let columns = column_names(&df);
//! ```

mod error;
mod reader;
mod table;

pub use error::{IngestError, Result};
pub use reader::{read_csv_bytes, read_csv_table, read_file_bytes, validate_encoding};
pub use table::{RawTable, column_names, preview_rows};
