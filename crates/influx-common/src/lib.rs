//! Shared utilities for the influx crates.
//!
//! This crate provides the Polars cell helpers used by the normalizer, the
//! aggregator and the CLI preview, plus the log redaction switch.

pub mod redact;
pub mod values;

pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data_enabled};
pub use values::{any_to_f64, any_to_string, format_numeric, parse_f64};
