//! Tests for influx-model types.

use influx_model::{
    ColumnMapping, ErrorKind, LogicalField, ModelError, NormalizedRow, NormalizedTable, Quarter,
    Selection,
};

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn quarters_order_q1_to_q4() {
    let mut quarters = vec![Quarter::Q3, Quarter::Q1, Quarter::Q4, Quarter::Q2];
    quarters.sort();
    assert_eq!(quarters, Quarter::ALL.to_vec());
    assert_eq!("Q2".parse::<Quarter>().unwrap(), Quarter::Q2);
    assert!("Q5".parse::<Quarter>().is_err());
    assert!("q1".parse::<Quarter>().is_err());
}

#[test]
fn logical_field_parses_loose_keys() {
    assert_eq!("Year".parse::<LogicalField>().unwrap(), LogicalField::Year);
    assert_eq!("dept".parse::<LogicalField>().unwrap(), LogicalField::Department);
    assert_eq!(
        "patient_count".parse::<LogicalField>().unwrap(),
        LogicalField::PatientCount
    );
    assert_eq!(
        "No. of Patients".parse::<LogicalField>().unwrap(),
        LogicalField::PatientCount
    );
    assert!(matches!(
        "ward".parse::<LogicalField>(),
        Err(ModelError::InvalidField(_))
    ));
}

#[test]
fn mapping_rejects_unknown_columns() {
    let available = columns(&["Yr", "Qtr"]);
    let mut mapping = ColumnMapping::new();
    mapping.assign(LogicalField::Year, "Yr", &available).unwrap();
    let err = mapping
        .assign(LogicalField::Quarter, "Quarter", &available)
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownColumn {
            field: LogicalField::Quarter,
            column: "Quarter".to_string(),
        }
    );
    assert_eq!(mapping.get(LogicalField::Year), Some("Yr"));
    assert!(!mapping.is_resolved(LogicalField::Quarter));
}

#[test]
fn mapping_reports_missing_in_field_order() {
    let available = columns(&["Dept"]);
    let mut mapping = ColumnMapping::new();
    mapping
        .assign(LogicalField::Department, "Dept", &available)
        .unwrap();
    assert_eq!(
        mapping.missing(),
        vec![
            LogicalField::Year,
            LogicalField::Quarter,
            LogicalField::PatientCount
        ]
    );
    assert!(mapping.to_resolved().is_none());
}

#[test]
fn complete_mapping_freezes() {
    let available = columns(&["Y", "Q", "D", "N"]);
    let mut mapping = ColumnMapping::new();
    for (field, col) in LogicalField::ALL.into_iter().zip(["Y", "Q", "D", "N"]) {
        mapping.assign(field, col, &available).unwrap();
    }
    let resolved = mapping.to_resolved().expect("complete");
    assert_eq!(resolved.column(LogicalField::PatientCount), "N");
    assert_eq!(resolved.year, "Y");
}

#[test]
fn selection_parsing() {
    assert_eq!(Selection::parse("none"), Selection::None);
    assert_eq!(Selection::parse("  NONE "), Selection::None);
    assert_eq!(Selection::parse(""), Selection::None);
    assert_eq!(
        Selection::parse(" Ward "),
        Selection::Column("Ward".to_string())
    );
    assert_eq!(Selection::None.to_string(), "None");
}

#[test]
fn departments_are_distinct_and_sorted() {
    let row = |dept: &str| NormalizedRow {
        year: "2021".to_string(),
        quarter: Quarter::Q1,
        department: dept.to_string(),
        patients: 1.0,
    };
    let table = NormalizedTable {
        rows: vec![row("Surgery"), row("ER"), row("ICU"), row("ER")],
        source_rows: 4,
        ..NormalizedTable::default()
    };
    assert_eq!(table.departments(), vec!["ER", "ICU", "Surgery"]);
    assert_eq!(table.rows_for("ER").count(), 2);
}

#[test]
fn mapping_serializes_with_field_keys() {
    let available = columns(&["Yr"]);
    let mut mapping = ColumnMapping::new();
    mapping.assign(LogicalField::Year, "Yr", &available).unwrap();
    let json = serde_json::to_string(&mapping).expect("serialize mapping");
    assert_eq!(json, r#"{"fields":{"year":"Yr"}}"#);
    let round: ColumnMapping = serde_json::from_str(&json).expect("deserialize mapping");
    assert_eq!(round, mapping);
}

#[test]
fn error_kind_blocking() {
    assert!(ErrorKind::MissingField.is_blocking());
    assert!(!ErrorKind::EmptyResult.is_blocking());
    assert_eq!(ErrorKind::EmptyResult.description(), "no usable data");
}
