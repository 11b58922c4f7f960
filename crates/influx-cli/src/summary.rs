use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use influx_cli::pipeline::{
    AnalysisReport, ColumnsReport, DepartmentsReport, RowCounts, error_kind,
};
use influx_common::format_numeric;
use influx_map::MappingError;
use influx_model::{LogicalField, Quarter, ResolvedMapping};

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_columns(report: &ColumnsReport) {
    println!(
        "Rows: {}  Columns: {}",
        report.rows,
        report.columns.len()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Token"),
    ]);
    apply_table_style(&mut table);
    for field in LogicalField::ALL {
        match report.detection.matches.iter().find(|m| m.field == field) {
            Some(found) => table.add_row(vec![
                Cell::new(field.label()),
                Cell::new(&found.column).fg(Color::Green),
                dim_cell(&found.token),
            ]),
            None => table.add_row(vec![
                Cell::new(field.label()),
                Cell::new("unresolved").fg(Color::Yellow),
                dim_cell("-"),
            ]),
        };
    }
    println!("{table}");

    if report.columns.is_empty() {
        return;
    }
    let mut preview = Table::new();
    preview.set_header(report.columns.iter().map(|name| header_cell(name)));
    apply_table_style(&mut preview);
    for row in &report.preview {
        preview.add_row(row);
    }
    if report.preview.is_empty() {
        println!("(no data rows)");
    } else {
        println!("{preview}");
    }
}

pub fn print_departments(report: &DepartmentsReport) {
    print_mapping(&report.mapping, report.rows);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Department"),
        header_cell("Rows"),
        header_cell("Patients"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in &report.departments {
        table.add_row(vec![
            Cell::new(&entry.department),
            Cell::new(entry.row_count),
            Cell::new(format_numeric(entry.total_patients)),
        ]);
    }
    println!("{table}");
}

pub fn print_analysis(report: &AnalysisReport) {
    print_mapping(&report.mapping, report.rows);

    let summary = &report.report.summary;
    println!(
        "Department: {}  Patients: {}  Years: {}  Rows: {}",
        summary.department,
        format_numeric(summary.total_patients),
        summary.distinct_years,
        summary.row_count
    );

    let mut series = Table::new();
    series.set_header(vec![
        header_cell("Year"),
        header_cell("Quarter"),
        header_cell("Patients"),
    ]);
    apply_table_style(&mut series);
    align_column(&mut series, 2, CellAlignment::Right);
    for point in &report.report.series.points {
        series.add_row(vec![
            Cell::new(&point.year),
            Cell::new(point.quarter),
            Cell::new(format_numeric(point.patients)),
        ]);
    }
    println!("{series}");

    let mut pivot = Table::new();
    let mut header = vec![header_cell("Year")];
    header.extend(Quarter::ALL.iter().map(|q| header_cell(q.as_str())));
    header.push(header_cell("Total"));
    pivot.set_header(header);
    apply_table_style(&mut pivot);
    for idx in 1..=Quarter::ALL.len() + 1 {
        align_column(&mut pivot, idx, CellAlignment::Right);
    }
    for row in &report.report.pivot.rows {
        let mut cells = vec![Cell::new(&row.year)];
        cells.extend(row.quarters.iter().map(|value| count_cell(*value)));
        cells.push(Cell::new(format_numeric(row.total())).add_attribute(Attribute::Bold));
        pivot.add_row(cells);
    }
    println!("{pivot}");
}

/// Writes the error chain, plus remapping hints when fields are missing.
pub fn print_error(error: &anyhow::Error) {
    let Some(kind) = error_kind(error) else {
        eprintln!("error: {error:#}");
        return;
    };
    eprintln!("error ({}): {error:#}", kind.description());
    if let Some(MappingError::MissingFields { available, .. }) = error.downcast_ref::<MappingError>()
    {
        eprintln!("available columns: {}", available.join(", "));
    }
    if kind.is_blocking() {
        let fields: Vec<&str> = LogicalField::ALL.iter().map(LogicalField::key).collect();
        eprintln!(
            "hint: pass --map FIELD=COLUMN (FIELD: {}) or --interactive to choose columns",
            fields.join(", ")
        );
    }
}

fn print_mapping(mapping: &ResolvedMapping, rows: RowCounts) {
    let assignments: Vec<String> = LogicalField::ALL
        .iter()
        .map(|field| format!("{} <- {}", field.label(), mapping.column(*field)))
        .collect();
    println!("Mapping: {}", assignments.join(", "));
    println!(
        "Rows: {} read, {} kept ({} invalid counts, {} invalid quarters, {} empty years or departments dropped)",
        rows.source,
        rows.retained,
        rows.dropped_counts,
        rows.dropped_quarters,
        rows.dropped_blanks
    );
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: f64) -> Cell {
    if value == 0.0 {
        dim_cell("0")
    } else {
        Cell::new(format_numeric(value))
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
