use influx_common::{format_numeric, parse_f64};
use influx_model::YearMode;

/// Turns a year cell into a grouping token.
pub fn year_token(raw: &str, mode: YearMode) -> String {
    let trimmed = raw.trim();
    match mode {
        YearMode::Verbatim => trimmed.to_string(),
        YearMode::Canonical => match parse_f64(trimmed) {
            Some(v) if v.is_finite() && v.fract() == 0.0 => format_numeric(v),
            _ => trimmed.to_string(),
        },
    }
}

pub fn department_token(raw: &str) -> String {
    raw.trim().to_string()
}
