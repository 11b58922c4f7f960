//! CLI library components for the patient influx analyzer.

pub mod cache;
pub mod logging;
pub mod pipeline;
pub mod prompt;
