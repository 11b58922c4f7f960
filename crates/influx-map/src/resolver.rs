//! Manual resolution of fields the matcher could not bind.
//!
//! The core never talks to a user. It emits one [`ResolutionRequest`] per
//! missing field, a [`FieldResolver`] supplied by the caller answers with a
//! [`Selection`], and [`merge_selections`] folds the answers in.

use std::collections::BTreeMap;

use influx_model::{
    ColumnMapping, LogicalField, MatchMode, MatchOptions, ModelError, NONE_LABEL,
    ResolvedMapping, Selection,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::MappingError;

/// A question for the caller: which column holds `field`?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRequest {
    pub field: LogicalField,
    /// `"None"` followed by every raw column in header order.
    pub options: Vec<String>,
}

impl ResolutionRequest {
    /// The raw column choices, without the leading "None".
    pub fn columns(&self) -> &[String] {
        self.options.get(1..).unwrap_or_default()
    }
}

/// Answers resolution requests on behalf of a user.
pub trait FieldResolver {
    fn select(&mut self, request: &ResolutionRequest) -> Result<Selection, MappingError>;
}

/// Answers from a fixed table; unanswered fields resolve to "None".
#[derive(Debug, Clone, Default)]
pub struct ScriptedResolver {
    answers: BTreeMap<LogicalField, Selection>,
}

impl ScriptedResolver {
    pub fn new(answers: BTreeMap<LogicalField, Selection>) -> Self {
        Self { answers }
    }
}

impl FieldResolver for ScriptedResolver {
    fn select(&mut self, request: &ResolutionRequest) -> Result<Selection, MappingError> {
        Ok(self
            .answers
            .get(&request.field)
            .cloned()
            .unwrap_or(Selection::None))
    }
}

/// One request per unresolved field, in field order.
pub fn resolution_requests(mapping: &ColumnMapping, columns: &[String]) -> Vec<ResolutionRequest> {
    let mut options = Vec::with_capacity(columns.len() + 1);
    options.push(NONE_LABEL.to_string());
    options.extend(columns.iter().cloned());
    mapping
        .missing()
        .into_iter()
        .map(|field| ResolutionRequest {
            field,
            options: options.clone(),
        })
        .collect()
}

/// Merges caller answers into `mapping`.
///
/// Answers for fields that are already bound are ignored. A `None` answer
/// leaves the field unresolved. Naming a column the table does not have is
/// an error, as is reusing a bound column in exclusive mode.
pub fn merge_selections(
    mapping: &ColumnMapping,
    selections: &BTreeMap<LogicalField, Selection>,
    columns: &[String],
    options: MatchOptions,
) -> Result<ColumnMapping, MappingError> {
    let mut merged = mapping.clone();
    for (field, selection) in selections {
        if mapping.is_resolved(*field) {
            debug!(field = %field, "ignoring answer for detected field");
            continue;
        }
        let Some(column) = selection.column() else {
            continue;
        };
        bind(&mut merged, *field, column, columns, options)?;
    }
    Ok(merged)
}

/// Forces assignments regardless of what detection found.
pub fn apply_overrides(
    mapping: &ColumnMapping,
    overrides: &BTreeMap<LogicalField, String>,
    columns: &[String],
    options: MatchOptions,
) -> Result<ColumnMapping, MappingError> {
    let mut merged = mapping.clone();
    for (field, column) in overrides {
        merged.unassign(*field);
        bind(&mut merged, *field, column, columns, options)?;
        info!(field = %field, column = %column, "manual mapping applied");
    }
    Ok(merged)
}

fn bind(
    mapping: &mut ColumnMapping,
    field: LogicalField,
    column: &str,
    columns: &[String],
    options: MatchOptions,
) -> Result<(), MappingError> {
    if options.mode == MatchMode::Exclusive && mapping.is_column_used(column) {
        return Err(MappingError::ColumnAlreadyUsed {
            field,
            column: column.to_string(),
        });
    }
    mapping
        .assign(field, column, columns)
        .map_err(|err| match err {
            ModelError::UnknownColumn { field, column } => {
                MappingError::ColumnNotFound { field, column }
            }
            other => MappingError::Resolver(other.to_string()),
        })
}

/// Runs one resolution round: asks `resolver` about every missing field.
pub fn resolve_with(
    mapping: &ColumnMapping,
    columns: &[String],
    resolver: &mut dyn FieldResolver,
    options: MatchOptions,
) -> Result<ColumnMapping, MappingError> {
    let mut selections = BTreeMap::new();
    for request in resolution_requests(mapping, columns) {
        let selection = resolver.select(&request)?;
        debug!(field = %request.field, selection = %selection, "resolver answered");
        selections.insert(request.field, selection);
    }
    merge_selections(mapping, &selections, columns, options)
}

/// Freezes a mapping, or reports every field that is still missing.
pub fn freeze(mapping: &ColumnMapping, columns: &[String]) -> Result<ResolvedMapping, MappingError> {
    mapping
        .to_resolved()
        .ok_or_else(|| MappingError::MissingFields {
            missing: mapping.missing(),
            available: columns.to_vec(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn requests_offer_none_first() {
        let columns = cols(&["A", "B"]);
        let requests = resolution_requests(&ColumnMapping::new(), &columns);
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].field, LogicalField::Year);
        assert_eq!(requests[0].options, vec!["None", "A", "B"]);
        assert_eq!(requests[0].columns(), ["A", "B"]);
    }

    #[test]
    fn request_without_options_has_no_columns() {
        let request = ResolutionRequest {
            field: LogicalField::Quarter,
            options: Vec::new(),
        };
        assert!(request.columns().is_empty());
    }

    #[test]
    fn none_answer_keeps_field_missing() {
        let columns = cols(&["A"]);
        let mut selections = BTreeMap::new();
        selections.insert(LogicalField::Year, Selection::None);
        let merged = merge_selections(
            &ColumnMapping::new(),
            &selections,
            &columns,
            MatchOptions::default(),
        )
        .unwrap();
        assert!(!merged.is_resolved(LogicalField::Year));
    }

    #[test]
    fn detected_fields_are_not_overwritten_by_answers() {
        let columns = cols(&["Yr", "Other"]);
        let mut mapping = ColumnMapping::new();
        mapping.assign(LogicalField::Year, "Yr", &columns).unwrap();
        let mut selections = BTreeMap::new();
        selections.insert(LogicalField::Year, Selection::Column("Other".to_string()));
        let merged =
            merge_selections(&mapping, &selections, &columns, MatchOptions::default()).unwrap();
        assert_eq!(merged.get(LogicalField::Year), Some("Yr"));
    }

    #[test]
    fn overrides_replace_detection() {
        let columns = cols(&["Yr", "Other"]);
        let mut mapping = ColumnMapping::new();
        mapping.assign(LogicalField::Year, "Yr", &columns).unwrap();
        let mut overrides = BTreeMap::new();
        overrides.insert(LogicalField::Year, "Other".to_string());
        let merged =
            apply_overrides(&mapping, &overrides, &columns, MatchOptions::exclusive()).unwrap();
        assert_eq!(merged.get(LogicalField::Year), Some("Other"));
    }

    #[test]
    fn exclusive_mode_rejects_reused_column() {
        let columns = cols(&["Yr"]);
        let mut mapping = ColumnMapping::new();
        mapping.assign(LogicalField::Year, "Yr", &columns).unwrap();
        let mut selections = BTreeMap::new();
        selections.insert(LogicalField::Quarter, Selection::Column("Yr".to_string()));
        let err = merge_selections(&mapping, &selections, &columns, MatchOptions::exclusive())
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::ColumnAlreadyUsed {
                field: LogicalField::Quarter,
                column: "Yr".to_string(),
            }
        );
    }
}
