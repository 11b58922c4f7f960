use std::collections::BTreeMap;

use influx_model::LogicalField;
use serde::{Deserialize, Serialize};

use crate::error::MappingError;

const YEAR_TOKENS: &[&str] = &["year", "yr", "years", "date_year", "time_year"];
const QUARTER_TOKENS: &[&str] = &["quarter", "qtr", "q", "quarters", "period"];
const DEPARTMENT_TOKENS: &[&str] = &[
    "department",
    "dept",
    "dep",
    "ward",
    "unit",
    "division",
    "section",
];
const PATIENT_COUNT_TOKENS: &[&str] = &[
    "patients",
    "patient",
    "count",
    "number",
    "total",
    "num_patients",
    "patient_count",
    "no_of_patients",
    "patient_total",
];

/// Lower-cases a header and turns spaces, dots and hyphens into underscores.
pub fn normalize_column_name(raw: &str) -> String {
    raw.to_lowercase().replace([' ', '.', '-'], "_")
}

/// Ordered candidate tokens per logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatterns {
    tokens: BTreeMap<LogicalField, Vec<String>>,
}

impl Default for FieldPatterns {
    fn default() -> Self {
        let mut tokens = BTreeMap::new();
        for field in LogicalField::ALL {
            let defaults = match field {
                LogicalField::Year => YEAR_TOKENS,
                LogicalField::Quarter => QUARTER_TOKENS,
                LogicalField::Department => DEPARTMENT_TOKENS,
                LogicalField::PatientCount => PATIENT_COUNT_TOKENS,
            };
            tokens.insert(
                field,
                defaults.iter().map(|t| (*t).to_string()).collect(),
            );
        }
        Self { tokens }
    }
}

impl FieldPatterns {
    pub fn tokens(&self, field: LogicalField) -> &[String] {
        self.tokens.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replaces the token list of one field.
    pub fn with_tokens(
        mut self,
        field: LogicalField,
        tokens: Vec<String>,
    ) -> Result<Self, MappingError> {
        let cleaned = clean_tokens(field, tokens)?;
        self.tokens.insert(field, cleaned);
        Ok(self)
    }

    /// Applies overrides from a JSON object such as `{"department": ["clinic"]}`.
    ///
    /// Fields absent from the object keep their default tokens.
    pub fn from_json(text: &str) -> Result<Self, MappingError> {
        let overrides: BTreeMap<LogicalField, Vec<String>> =
            serde_json::from_str(text).map_err(|e| MappingError::InvalidPatterns(e.to_string()))?;
        let mut patterns = Self::default();
        for (field, tokens) in overrides {
            patterns = patterns.with_tokens(field, tokens)?;
        }
        Ok(patterns)
    }
}

fn clean_tokens(field: LogicalField, tokens: Vec<String>) -> Result<Vec<String>, MappingError> {
    let mut cleaned = Vec::with_capacity(tokens.len());
    for token in tokens {
        let normalized = normalize_column_name(token.trim());
        // An empty token is a substring of every header.
        if normalized.is_empty() {
            return Err(MappingError::InvalidPatterns(format!(
                "empty token for {field}"
            )));
        }
        cleaned.push(normalized);
    }
    Ok(cleaned)
}
