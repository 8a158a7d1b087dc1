use super::cell::{cell_text, field_value};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Case-insensitive substring match against any field of the row
pub fn matches_search(row: &Value, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.trim().is_empty() {
        return true;
    }

    let contains = |value: &Value| {
        cell_text(value)
            .map(|text| text.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };

    match row {
        Value::Object(fields) => fields.values().any(contains),
        other => contains(other),
    }
}

/// Every chosen column value must equal the row's value exactly
pub fn matches_column_filters(row: &Value, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(key, wanted)| {
        field_value(row, key)
            .and_then(cell_text)
            .map(|actual| actual == *wanted)
            .unwrap_or(false)
    })
}

/// Rows passing the search term and all column filters.
///
/// With `server_search` the term is ignored here: the page refetches with
/// the term applied by the backend.
pub fn filter_rows(
    rows: &[Value],
    search: &str,
    filters: &BTreeMap<String, String>,
    server_search: bool,
) -> Vec<Value> {
    rows.iter()
        .filter(|row| server_search || matches_search(row, search))
        .filter(|row| matches_column_filters(row, filters))
        .cloned()
        .collect()
}

/// Sorted distinct values of a column, for its filter dropdown
pub fn distinct_values(rows: &[Value], key: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| field_value(row, key).and_then(cell_text))
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
