//! Integration tests for table normalization.

use influx_model::{ErrorKind, NormalizeOptions, Quarter, ResolvedMapping, YearMode};
use influx_transform::{NormalizeError, normalize_table};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values.iter().copied().map(String::from).collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

fn mapping() -> ResolvedMapping {
    ResolvedMapping {
        year: "Year".to_string(),
        quarter: "Quarter".to_string(),
        department: "Department".to_string(),
        patient_count: "Patients".to_string(),
    }
}

#[test]
fn test_normalize_coerces_every_field() {
    let df = test_df(vec![
        ("Year", vec!["2021", "2021", "2022"]),
        ("Quarter", vec!["1", "Quarter 2", "q3"]),
        ("Department", vec!["ICU ", " ER", "ICU"]),
        ("Patients", vec!["1,234", "50", "7"]),
    ]);

    let table = normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.source_rows, 3);
    assert_eq!(table.rows[0].patients, 1234.0);
    assert_eq!(table.rows[0].quarter, Quarter::Q1);
    assert_eq!(table.rows[0].department, "ICU");
    assert_eq!(table.rows[1].quarter, Quarter::Q2);
    assert_eq!(table.rows[1].department, "ER");
    assert_eq!(table.rows[2].quarter, Quarter::Q3);
    assert_eq!(table.departments(), vec!["ER".to_string(), "ICU".to_string()]);
}

#[test]
fn test_normalize_drops_invalid_counts_and_quarters() {
    let df = test_df(vec![
        ("Year", vec!["2021", "2021", "2021", "2021"]),
        ("Quarter", vec!["Q1", "Q5", "Q2", "Q3"]),
        ("Department", vec!["ER", "ER", "ER", "ER"]),
        ("Patients", vec!["10", "20", "abc", "-4"]),
    ]);

    let table = normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.dropped_counts, 2);
    assert_eq!(table.dropped_quarters, 1);
    assert_eq!(table.rows[0].patients, 10.0);
}

#[test]
fn test_normalize_only_invalid_count_is_empty_result() {
    let df = test_df(vec![
        ("Year", vec!["2021"]),
        ("Quarter", vec!["Q1"]),
        ("Department", vec!["ER"]),
        ("Patients", vec!["abc"]),
    ]);

    let err = normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap_err();

    assert!(matches!(err, NormalizeError::NoValidCounts { rows: 1, .. }));
    assert_eq!(err.kind(), ErrorKind::EmptyResult);
}

#[test]
fn test_normalize_all_quarters_invalid_is_empty_result() {
    let df = test_df(vec![
        ("Year", vec!["2021", "2021"]),
        ("Quarter", vec!["H1", "Q0"]),
        ("Department", vec!["ER", "ER"]),
        ("Patients", vec!["1", "2"]),
    ]);

    let err = normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        NormalizeError::NoUsableRows {
            source_rows: 2,
            dropped_counts: 0,
            dropped_quarters: 2,
            dropped_blanks: 0,
        }
    ));
    assert_eq!(err.kind(), ErrorKind::EmptyResult);
}

#[test]
fn test_normalize_header_only_table() {
    let df = test_df(vec![
        ("Year", vec![]),
        ("Quarter", vec![]),
        ("Department", vec![]),
        ("Patients", vec![]),
    ]);

    let err = normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EmptyResult);
}

#[test]
fn test_normalize_year_modes() {
    let df = test_df(vec![
        ("Year", vec!["2020", "2020.0"]),
        ("Quarter", vec!["Q1", "Q1"]),
        ("Department", vec!["ER", "ER"]),
        ("Patients", vec!["1", "2"]),
    ]);

    let verbatim = normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap();
    assert_eq!(verbatim.rows[1].year, "2020.0");

    let canonical = normalize_table(
        &df,
        &mapping(),
        NormalizeOptions::new().with_year_mode(YearMode::Canonical),
    )
    .unwrap();
    assert_eq!(canonical.rows[0].year, "2020");
    assert_eq!(canonical.rows[1].year, "2020");
}

#[test]
fn test_normalize_same_column_for_two_fields() {
    let df = test_df(vec![
        ("Year", vec!["2021"]),
        ("Quarter", vec!["Q4"]),
        ("Department", vec!["ER"]),
    ]);
    let shared = ResolvedMapping {
        patient_count: "Year".to_string(),
        ..mapping()
    };

    let table = normalize_table(&df, &shared, NormalizeOptions::default()).unwrap();

    assert_eq!(table.rows[0].patients, 2021.0);
    assert_eq!(table.rows[0].year, "2021");
}

#[test]
fn test_normalize_unknown_column() {
    let df = test_df(vec![("Year", vec!["2021"])]);

    let err = normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap_err();

    assert!(matches!(err, NormalizeError::ColumnNotFound { .. }));
    assert_eq!(err.kind(), ErrorKind::Coercion);
}

#[test]
fn test_normalize_leaves_input_untouched() {
    let df = test_df(vec![
        ("Year", vec!["2021"]),
        ("Quarter", vec!["first"]),
        ("Department", vec!["ICU "]),
        ("Patients", vec!["1,000"]),
    ]);
    let before = df.clone();

    normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap();

    assert!(df.equals_missing(&before));
}

#[test]
fn test_normalize_drops_empty_year_or_department() {
    let df = test_df(vec![
        ("Year", vec!["2021", "", "2021", "2022"]),
        ("Quarter", vec!["Q1", "Q2", "Q1", "Q3"]),
        ("Department", vec!["", "ER", "ER", "  "]),
        ("Patients", vec!["5", "7", "3", "4"]),
    ]);

    let table = normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.dropped_blanks, 3);
    assert_eq!(table.departments(), vec!["ER".to_string()]);
    assert_eq!(table.rows[0].year, "2021");
    assert_eq!(table.rows[0].patients, 3.0);
}

#[test]
fn test_normalize_only_blank_rows_is_empty_result() {
    let df = test_df(vec![
        ("Year", vec![""]),
        ("Quarter", vec!["Q1"]),
        ("Department", vec!["ER"]),
        ("Patients", vec!["5"]),
    ]);

    let err = normalize_table(&df, &mapping(), NormalizeOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        NormalizeError::NoUsableRows {
            dropped_blanks: 1,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::EmptyResult);
}
