use influx_common::any_to_string;
use polars::prelude::DataFrame;

/// The loaded upload. Column order is the file's header order.
pub type RawTable = DataFrame;

/// Raw column names in header order.
pub fn column_names(df: &RawTable) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// First `limit` rows rendered as text, for previews.
pub fn preview_rows(df: &RawTable, limit: usize) -> Vec<Vec<String>> {
    let height = df.height().min(limit);
    (0..height)
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|col| col.get(idx).map(any_to_string).unwrap_or_default())
                .collect()
        })
        .collect()
}
