//! Configuration options for matching and normalization.

use serde::{Deserialize, Serialize};

/// Whether one raw column may satisfy several logical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// A matched column stays available to later fields.
    #[default]
    Permissive,
    /// A column claimed by an earlier field is skipped.
    Exclusive,
}

/// Options for the column matcher.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MatchOptions {
    pub mode: MatchMode,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn exclusive() -> Self {
        Self {
            mode: MatchMode::Exclusive,
        }
    }
}

/// How year cells become grouping tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YearMode {
    /// Keep the trimmed cell text; "2020" and "2020.0" stay distinct.
    #[default]
    Verbatim,
    /// Render integral numbers without a fraction, so "2020.0" groups with "2020".
    Canonical,
}

/// Options for the value normalizer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub year_mode: YearMode,
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_year_mode(mut self, year_mode: YearMode) -> Self {
        self.year_mode = year_mode;
        self
    }
}
