use serde_json::Value;

/// Placeholder shown for empty cells
pub const EMPTY_CELL: &str = "—";
/// JSON dumps of nested objects are cut to this many characters
const MAX_JSON_CELL: usize = 50;

/// Value at `key` in `row`; dotted keys walk nested objects
pub fn field_value<'a>(row: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(direct) = row.get(key) {
        return Some(direct);
    }
    key.split('.').try_fold(row, |current, part| current.get(part))
}

/// Searchable/filterable text of a value.
///
/// Strings as-is, numbers and booleans stringified, objects by their `name`,
/// arrays by their items joined with `", "`. `null` has no text.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(obj) => obj.get("name").and_then(cell_text),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(cell_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
    }
}

/// Display text for a cell whose column has no custom render
pub fn fallback_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => EMPTY_CELL.to_string(),
        Some(Value::Object(obj)) => match obj.get("name").and_then(cell_text) {
            Some(name) => name,
            None => truncate(&Value::Object(obj.clone()).to_string(), MAX_JSON_CELL),
        },
        Some(other) => cell_text(other).unwrap_or_default(),
    }
}

/// Row identifier: `id`, else `_id`. Numeric ids are stringified.
pub fn row_id(row: &Value) -> Option<String> {
    ["id", "_id"]
        .iter()
        .filter_map(|key| row.get(*key))
        .find_map(|id| match id {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}
