//! CLI argument definitions for the patient influx analyzer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use influx_model::LogicalField;

#[derive(Parser)]
#[command(
    name = "influx",
    version,
    about = "Patient influx analyzer - quarterly patient counts per department",
    long_about = "Analyze hospital patient-visit exports.\n\n\
                  Detects the year, quarter, department and patient count columns of a CSV file,\n\
                  normalizes their values and reports per-quarter totals for a department."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the columns of a CSV file and the detected field mapping.
    Columns(ColumnsArgs),

    /// List departments with row counts and patient totals.
    Departments(DepartmentsArgs),

    /// Aggregate patient counts by year and quarter for one department.
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// CSV file to inspect.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    #[command(flatten)]
    pub detection: DetectionArgs,

    /// Number of rows to preview.
    #[arg(long = "rows", default_value_t = 5)]
    pub rows: usize,

    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Parser)]
pub struct DepartmentsArgs {
    /// CSV file to read.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    #[command(flatten)]
    pub mapping: MappingArgs,

    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// CSV file to read.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Department to report on (default: first in sorted order).
    #[arg(long = "department", value_name = "NAME")]
    pub department: Option<String>,

    #[command(flatten)]
    pub mapping: MappingArgs,

    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

/// Column detection knobs.
#[derive(Args)]
pub struct DetectionArgs {
    /// JSON file replacing the match tokens of one or more fields.
    ///
    /// Example: {"department": ["clinic", "ward"]}
    #[arg(long = "patterns", value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Do not let one column satisfy several fields.
    #[arg(long = "exclusive-columns")]
    pub exclusive_columns: bool,
}

/// Column mapping and value normalization knobs.
#[derive(Args)]
pub struct MappingArgs {
    #[command(flatten)]
    pub detection: DetectionArgs,

    /// Assign a column to a field, overriding detection (repeatable).
    ///
    /// FIELD is one of year, quarter, department, patients.
    #[arg(long = "map", value_name = "FIELD=COLUMN", value_parser = parse_field_assignment)]
    pub map: Vec<(LogicalField, String)>,

    /// Prompt on stdin for fields that could not be detected.
    #[arg(long = "interactive")]
    pub interactive: bool,

    /// Group years numerically so "2020.0" and "2020" are the same year.
    #[arg(long = "canonical-years")]
    pub canonical_years: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_field_assignment(raw: &str) -> Result<(LogicalField, String), String> {
    let (field, column) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=COLUMN, got '{raw}'"))?;
    let field: LogicalField = field.parse().map_err(|err| format!("{err}"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("no column given for {field}"));
    }
    Ok((field, column.to_string()))
}
