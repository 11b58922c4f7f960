//! Assignments of logical fields to raw input columns.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{LogicalField, ModelError};

/// Label of the "leave unresolved" option offered to the caller.
pub const NONE_LABEL: &str = "None";

/// Partial assignment of logical fields to raw column names.
///
/// A field is either mapped to exactly one column that exists in the input,
/// or absent. Assignments are validated against the column list at insert
/// time, so a mapping never names a column the table does not have.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    fields: BTreeMap<LogicalField, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `column` to `field`, replacing any earlier assignment.
    pub fn assign(
        &mut self,
        field: LogicalField,
        column: &str,
        available: &[String],
    ) -> Result<(), ModelError> {
        if !available.iter().any(|c| c == column) {
            return Err(ModelError::UnknownColumn {
                field,
                column: column.to_string(),
            });
        }
        self.fields.insert(field, column.to_string());
        Ok(())
    }

    /// Removes the assignment for `field`, returning the column it pointed at.
    pub fn unassign(&mut self, field: LogicalField) -> Option<String> {
        self.fields.remove(&field)
    }

    pub fn get(&self, field: LogicalField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_resolved(&self, field: LogicalField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Fields still unresolved, in matching order.
    pub fn missing(&self) -> Vec<LogicalField> {
        LogicalField::ALL
            .into_iter()
            .filter(|field| !self.fields.contains_key(field))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// True if another field already claims `column`.
    pub fn is_column_used(&self, column: &str) -> bool {
        self.fields.values().any(|c| c == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalField, &str)> {
        self.fields.iter().map(|(field, col)| (*field, col.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Freezes a complete mapping. Returns `None` while any field is missing.
    pub fn to_resolved(&self) -> Option<ResolvedMapping> {
        Some(ResolvedMapping {
            year: self.get(LogicalField::Year)?.to_string(),
            quarter: self.get(LogicalField::Quarter)?.to_string(),
            department: self.get(LogicalField::Department)?.to_string(),
            patient_count: self.get(LogicalField::PatientCount)?.to_string(),
        })
    }
}

/// A frozen mapping with every logical field bound to a raw column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMapping {
    pub year: String,
    pub quarter: String,
    pub department: String,
    pub patient_count: String,
}

impl ResolvedMapping {
    pub fn column(&self, field: LogicalField) -> &str {
        match field {
            LogicalField::Year => &self.year,
            LogicalField::Quarter => &self.quarter,
            LogicalField::Department => &self.department,
            LogicalField::PatientCount => &self.patient_count,
        }
    }
}

/// How the matcher bound a field: the column and the token that hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMatch {
    pub field: LogicalField,
    pub column: String,
    pub token: String,
}

/// A caller's answer to a resolution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Leave the field unresolved.
    None,
    /// Bind the field to this raw column.
    Column(String),
}

impl Selection {
    /// Parses a prompt answer. "none" (any case) or blank means no column.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NONE_LABEL) {
            Self::None
        } else {
            Self::Column(trimmed.to_string())
        }
    }

    pub fn column(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Column(name) => Some(name),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str(NONE_LABEL),
            Self::Column(name) => f.write_str(name),
        }
    }
}
