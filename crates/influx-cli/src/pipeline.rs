//! The load → match → resolve → normalize → aggregate pass behind each command.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use influx_ingest::{IngestError, RawTable, column_names, preview_rows};
use influx_map::{
    ColumnMatcher, FieldPatterns, FieldResolver, MappingError, MatchOutcome, apply_overrides,
    freeze, resolve_with,
};
use influx_model::{
    DepartmentOverview, ErrorKind, LogicalField, MatchOptions, NormalizeOptions, NormalizedTable,
    ResolvedMapping,
};
use influx_report::{DepartmentReport, ReportError, build_report, department_overview};
use influx_transform::{NormalizeError, normalize_table};
use serde::Serialize;
use tracing::{info, info_span, warn};

/// Exit status for a successful run.
pub const EXIT_OK: i32 = 0;
/// File parse, coercion and argument failures.
pub const EXIT_FAILURE: i32 = 1;
/// Required fields could not be mapped.
pub const EXIT_MISSING_FIELDS: i32 = 2;
/// Nothing usable survived normalization or the department filter.
pub const EXIT_EMPTY_RESULT: i32 = 3;

/// Everything needed to take a raw table to a department report.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRequest {
    pub matcher: ColumnMatcher,
    /// Forced field assignments; these win over detection.
    pub overrides: BTreeMap<LogicalField, String>,
    pub normalize: NormalizeOptions,
    /// Department to report on. The first one in sorted order when unset.
    pub department: Option<String>,
}

/// Detected layout of an upload.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnsReport {
    pub rows: usize,
    pub columns: Vec<String>,
    pub detection: MatchOutcome,
    pub preview: Vec<Vec<String>>,
}

/// Row accounting for the normalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowCounts {
    pub source: usize,
    pub retained: usize,
    pub dropped_counts: usize,
    pub dropped_quarters: usize,
    pub dropped_blanks: usize,
}

impl RowCounts {
    fn from_table(table: &NormalizedTable) -> Self {
        Self {
            source: table.source_rows,
            retained: table.len(),
            dropped_counts: table.dropped_counts,
            dropped_quarters: table.dropped_quarters,
            dropped_blanks: table.dropped_blanks,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentsReport {
    pub mapping: ResolvedMapping,
    pub rows: RowCounts,
    pub departments: Vec<DepartmentOverview>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub mapping: ResolvedMapping,
    pub rows: RowCounts,
    /// Every department, sorted; the selection list.
    pub departments: Vec<String>,
    #[serde(flatten)]
    pub report: DepartmentReport,
}

/// Builds a matcher from an optional token override file.
pub fn build_matcher(patterns: Option<&Path>, options: MatchOptions) -> Result<ColumnMatcher> {
    let field_patterns = match patterns {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read patterns file {}", path.display()))?;
            FieldPatterns::from_json(&text)
                .with_context(|| format!("parse patterns file {}", path.display()))?
        }
        None => FieldPatterns::default(),
    };
    Ok(ColumnMatcher::new(field_patterns).with_options(options))
}

/// Shape, detected mapping and leading rows of `df`.
pub fn inspect(df: &RawTable, matcher: &ColumnMatcher, preview_limit: usize) -> ColumnsReport {
    let columns = column_names(df);
    let detection = matcher.suggest(&columns);
    ColumnsReport {
        rows: df.height(),
        preview: preview_rows(df, preview_limit),
        columns,
        detection,
    }
}

/// Detects, applies overrides, asks `resolver` about what is left, then freezes.
pub fn resolve_mapping(
    columns: &[String],
    request: &AnalyzeRequest,
    resolver: Option<&mut dyn FieldResolver>,
) -> Result<ResolvedMapping, MappingError> {
    let options = request.matcher.options();
    let outcome = request.matcher.suggest(columns);
    let mut mapping = apply_overrides(&outcome.mapping, &request.overrides, columns, options)?;
    if let Some(resolver) = resolver
        && !mapping.is_complete()
    {
        mapping = resolve_with(&mapping, columns, resolver, options)?;
    }
    let missing = mapping.missing();
    if !missing.is_empty() {
        warn!(missing = ?missing, "required fields unresolved");
    }
    freeze(&mapping, columns)
}

/// Resolves the mapping and normalizes `df`.
pub fn normalize(
    df: &RawTable,
    request: &AnalyzeRequest,
    resolver: Option<&mut dyn FieldResolver>,
) -> Result<(ResolvedMapping, NormalizedTable)> {
    let columns = column_names(df);
    let mapping = resolve_mapping(&columns, request, resolver).context("map columns")?;
    let table = normalize_table(df, &mapping, request.normalize).context("normalize values")?;
    Ok((mapping, table))
}

/// Per-department row counts and totals.
pub fn overview(
    df: &RawTable,
    request: &AnalyzeRequest,
    resolver: Option<&mut dyn FieldResolver>,
) -> Result<DepartmentsReport> {
    let (mapping, table) = normalize(df, request, resolver)?;
    Ok(DepartmentsReport {
        mapping,
        rows: RowCounts::from_table(&table),
        departments: department_overview(&table),
    })
}

/// Full pass for one department.
pub fn analyze(
    df: &RawTable,
    request: &AnalyzeRequest,
    resolver: Option<&mut dyn FieldResolver>,
) -> Result<AnalysisReport> {
    let span = info_span!("analyze", rows = df.height(), columns = df.width());
    let _guard = span.enter();

    let (mapping, table) = normalize(df, request, resolver)?;
    let departments = table.departments();
    let department = match &request.department {
        Some(name) => name.clone(),
        None => departments.first().cloned().unwrap_or_default(),
    };
    info!(department = %department, available = departments.len(), "selected department");

    let report = build_report(&table, &department)
        .with_context(|| format!("report department '{department}'"))?;

    Ok(AnalysisReport {
        mapping,
        rows: RowCounts::from_table(&table),
        departments,
        report,
    })
}

/// Category of a pipeline failure, if it came from one of the library crates.
pub fn error_kind(error: &anyhow::Error) -> Option<ErrorKind> {
    if let Some(err) = error.downcast_ref::<IngestError>() {
        return Some(err.kind());
    }
    if let Some(err) = error.downcast_ref::<MappingError>() {
        return Some(err.kind());
    }
    if let Some(err) = error.downcast_ref::<NormalizeError>() {
        return Some(err.kind());
    }
    error.downcast_ref::<ReportError>().map(ReportError::kind)
}

/// Process exit status for a failed run.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(MappingError::MissingFields { .. }) = error.downcast_ref::<MappingError>() {
        return EXIT_MISSING_FIELDS;
    }
    match error_kind(error) {
        Some(ErrorKind::EmptyResult) => EXIT_EMPTY_RESULT,
        _ => EXIT_FAILURE,
    }
}
