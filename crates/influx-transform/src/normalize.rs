//! Table-level normalization.

use influx_common::{any_to_string, redact_value};
use influx_model::{LogicalField, NormalizeOptions, NormalizedRow, NormalizedTable, ResolvedMapping};
use polars::prelude::{Column, DataFrame};
use tracing::{debug, info, info_span, warn};

use crate::error::NormalizeError;
use crate::normalization::{coerce_count, department_token, parse_quarter, year_token};

/// Projects the mapped columns and coerces every retained cell.
///
/// Steps, in order:
/// 1. select the four mapped columns
/// 2. coerce patient counts and drop rows that fail; fail if none remain
/// 3. canonicalize quarters and drop rows outside Q1..Q4
/// 4. turn years into text tokens
/// 5. trim department names
/// 6. drop rows whose year or department is empty
///
/// The input frame is never modified.
pub fn normalize_table(
    df: &DataFrame,
    mapping: &ResolvedMapping,
    options: NormalizeOptions,
) -> Result<NormalizedTable, NormalizeError> {
    let span = info_span!("normalize", rows = df.height());
    let _guard = span.enter();

    let year_col = mapped_column(df, mapping, LogicalField::Year)?;
    let quarter_col = mapped_column(df, mapping, LogicalField::Quarter)?;
    let department_col = mapped_column(df, mapping, LogicalField::Department)?;
    let patients_col = mapped_column(df, mapping, LogicalField::PatientCount)?;

    let source_rows = df.height();
    let mut counts = Vec::with_capacity(source_rows);
    for idx in 0..source_rows {
        counts.push(coerce_count(patients_col.get(idx)?));
    }
    let dropped_counts = counts.iter().filter(|count| count.is_none()).count();
    if dropped_counts == source_rows {
        return Err(NormalizeError::NoValidCounts {
            column: mapping.patient_count.clone(),
            rows: source_rows,
        });
    }

    let mut rows = Vec::with_capacity(source_rows - dropped_counts);
    let mut dropped_quarters = 0usize;
    let mut dropped_blanks = 0usize;
    for (idx, count) in counts.into_iter().enumerate() {
        let Some(patients) = count else {
            continue;
        };
        let raw_quarter = any_to_string(quarter_col.get(idx)?);
        let Some(quarter) = parse_quarter(&raw_quarter) else {
            debug!(
                row = idx,
                value = redact_value(&raw_quarter),
                "dropping row with unrecognized quarter"
            );
            dropped_quarters += 1;
            continue;
        };
        let year = year_token(&any_to_string(year_col.get(idx)?), options.year_mode);
        let department = department_token(&any_to_string(department_col.get(idx)?));
        if year.is_empty() || department.is_empty() {
            debug!(row = idx, "dropping row with empty year or department");
            dropped_blanks += 1;
            continue;
        }
        rows.push(NormalizedRow {
            year,
            quarter,
            department,
            patients,
        });
    }

    if rows.is_empty() {
        return Err(NormalizeError::NoUsableRows {
            source_rows,
            dropped_counts,
            dropped_quarters,
            dropped_blanks,
        });
    }

    if dropped_counts + dropped_quarters + dropped_blanks > 0 {
        warn!(
            dropped_counts,
            dropped_quarters, dropped_blanks, "dropped rows that failed value coercion"
        );
    }
    info!(
        retained = rows.len(),
        dropped_counts,
        dropped_quarters,
        dropped_blanks,
        "normalized patient rows"
    );

    Ok(NormalizedTable {
        rows,
        source_rows,
        dropped_counts,
        dropped_quarters,
        dropped_blanks,
    })
}

fn mapped_column<'a>(
    df: &'a DataFrame,
    mapping: &ResolvedMapping,
    field: LogicalField,
) -> Result<&'a Column, NormalizeError> {
    let name = mapping.column(field);
    df.column(name)
        .map_err(|_| NormalizeError::ColumnNotFound {
            field,
            column: name.to_string(),
        })
}
