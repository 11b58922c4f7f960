//! Token-based column detection.

use influx_model::{ColumnMapping, FieldMatch, LogicalField, MatchMode, MatchOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::patterns::{FieldPatterns, normalize_column_name};

/// Result of automatic detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Fields that matched a column.
    pub mapping: ColumnMapping,
    /// Column and token behind each match, in field order.
    pub matches: Vec<FieldMatch>,
    /// Fields that need manual resolution.
    pub unresolved: Vec<LogicalField>,
}

impl MatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Maps raw column headers onto logical fields.
#[derive(Debug, Clone, Default)]
pub struct ColumnMatcher {
    patterns: FieldPatterns,
    options: MatchOptions,
}

impl ColumnMatcher {
    pub fn new(patterns: FieldPatterns) -> Self {
        Self {
            patterns,
            options: MatchOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn patterns(&self) -> &FieldPatterns {
        &self.patterns
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Binds each field to the first column (in header order) whose
    /// normalized name contains one of the field's tokens.
    ///
    /// In permissive mode a column may serve several fields. Unmatched
    /// fields are reported, never an error.
    pub fn suggest(&self, columns: &[String]) -> MatchOutcome {
        let normalized: Vec<(&String, String)> = columns
            .iter()
            .map(|raw| (raw, normalize_column_name(raw)))
            .collect();

        let mut mapping = ColumnMapping::new();
        let mut matches = Vec::new();
        for field in LogicalField::ALL {
            let tokens = self.patterns.tokens(field);
            let hit = normalized.iter().find_map(|(raw, clean)| {
                if self.options.mode == MatchMode::Exclusive && mapping.is_column_used(raw) {
                    return None;
                }
                tokens
                    .iter()
                    .find(|token| clean.contains(token.as_str()))
                    .map(|token| (*raw, token))
            });
            let Some((column, token)) = hit else {
                continue;
            };
            if mapping.assign(field, column, columns).is_ok() {
                debug!(field = %field, column = %column, token = %token, "column detected");
                matches.push(FieldMatch {
                    field,
                    column: column.clone(),
                    token: token.clone(),
                });
            }
        }

        let unresolved = mapping.missing();
        if !unresolved.is_empty() {
            warn!(
                missing = ?unresolved.iter().map(LogicalField::key).collect::<Vec<_>>(),
                columns = columns.len(),
                "could not detect all required columns"
            );
        }
        MatchOutcome {
            mapping,
            matches,
            unresolved,
        }
    }
}

/// Detection with the default tokens and permissive matching.
pub fn detect_columns(columns: &[String]) -> MatchOutcome {
    ColumnMatcher::default().suggest(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn detects_standard_headers() {
        let outcome = detect_columns(&cols(&["Year", "Quarter", "Department", "No. of Patients"]));
        assert!(outcome.is_complete());
        assert_eq!(outcome.mapping.get(LogicalField::PatientCount), Some("No. of Patients"));
        assert_eq!(outcome.matches[3].token, "patients");
    }

    #[test]
    fn first_column_in_header_order_wins() {
        let outcome = detect_columns(&cols(&["Ward", "Department"]));
        assert_eq!(outcome.mapping.get(LogicalField::Department), Some("Ward"));
    }

    #[test]
    fn permissive_mode_reuses_columns() {
        // "year_total" holds both a year token and a count token.
        let outcome = detect_columns(&cols(&["year_total", "qtr", "dept"]));
        assert_eq!(outcome.mapping.get(LogicalField::Year), Some("year_total"));
        assert_eq!(
            outcome.mapping.get(LogicalField::PatientCount),
            Some("year_total")
        );
        assert!(outcome.is_complete());
    }

    #[test]
    fn exclusive_mode_skips_claimed_columns() {
        let matcher = ColumnMatcher::default().with_options(MatchOptions::exclusive());
        let outcome = matcher.suggest(&cols(&["year_total", "qtr", "dept"]));
        assert_eq!(outcome.mapping.get(LogicalField::Year), Some("year_total"));
        assert_eq!(outcome.mapping.get(LogicalField::PatientCount), None);
        assert_eq!(outcome.unresolved, vec![LogicalField::PatientCount]);
    }

    #[test]
    fn nothing_matches_empty_header_list() {
        let outcome = detect_columns(&[]);
        assert!(outcome.mapping.is_empty());
        assert_eq!(outcome.unresolved, LogicalField::ALL.to_vec());
    }
}
