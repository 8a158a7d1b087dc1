use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Could not read file: {0}")]
    Read(String),
    #[error("Could not parse spreadsheet: {0}")]
    Parse(String),
    #[error("The file is empty")]
    Empty,
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// How a cell's text becomes a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ImportKind {
    #[default]
    Text,
    Number,
    Bool,
}

impl ImportKind {
    fn convert(self, text: &str) -> Value {
        match self {
            ImportKind::Text => Value::String(text.to_string()),
            ImportKind::Number => {
                let normalized = text.replace(',', ".");
                if let Ok(i) = normalized.parse::<i64>() {
                    Value::from(i)
                } else {
                    normalized
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::String(text.to_string()))
                }
            }
            ImportKind::Bool => {
                let lower = text.to_lowercase();
                Value::Bool(matches!(lower.as_str(), "true" | "1" | "yes" | "active"))
            }
        }
    }
}

/// Expected spreadsheet column: `header` in the file, `key` in the row object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportColumn {
    pub key: String,
    pub header: String,
    pub kind: ImportKind,
    pub required: bool,
}

impl ImportColumn {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            kind: ImportKind::Text,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn kind(mut self, kind: ImportKind) -> Self {
        self.kind = kind;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub expected: String,
    pub found: Option<String>,
    pub file_index: Option<usize>,
}

/// Parsed upload: one JSON object per non-empty data row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportTable {
    pub file_name: String,
    pub file_headers: Vec<String>,
    pub column_mapping: Vec<ColumnMapping>,
    pub rows: Vec<Value>,
}

impl ImportTable {
    pub fn from_raw(
        raw: Vec<Vec<String>>,
        columns: &[ImportColumn],
        file_name: impl Into<String>,
    ) -> Result<Self, ImportError> {
        let Some((headers, data)) = raw.split_first() else {
            return Err(ImportError::Empty);
        };
        let file_headers: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

        let mut header_indices: HashMap<String, usize> = HashMap::new();
        for (idx, header) in file_headers.iter().enumerate() {
            header_indices.entry(header.to_lowercase()).or_insert(idx);
        }

        let column_mapping: Vec<ColumnMapping> = columns
            .iter()
            .map(|col| {
                let wanted = col.header.trim().to_lowercase();
                let file_index = header_indices.get(&wanted).copied();
                ColumnMapping {
                    expected: col.header.clone(),
                    found: file_index.map(|i| file_headers[i].clone()),
                    file_index,
                }
            })
            .collect();

        let missing: Vec<String> = columns
            .iter()
            .zip(&column_mapping)
            .filter(|(col, mapping)| col.required && mapping.file_index.is_none())
            .map(|(col, _)| col.header.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        let rows = data
            .iter()
            .filter_map(|row| {
                let cells: Vec<(&ImportColumn, &str)> = columns
                    .iter()
                    .zip(&column_mapping)
                    .filter_map(|(col, mapping)| {
                        let idx = mapping.file_index?;
                        Some((col, row.get(idx).map(|s| s.trim()).unwrap_or("")))
                    })
                    .collect();
                if cells.iter().all(|(_, text)| text.is_empty()) {
                    return None;
                }
                let object: Map<String, Value> = cells
                    .into_iter()
                    .filter(|(_, text)| !text.is_empty())
                    .map(|(col, text)| (col.key.clone(), col.kind.convert(text)))
                    .collect();
                Some(Value::Object(object))
            })
            .collect();

        Ok(Self {
            file_name: file_name.into(),
            file_headers,
            column_mapping,
            rows,
        })
    }

    pub fn unmapped_count(&self) -> usize {
        self.column_mapping.iter().filter(|m| m.found.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<ImportColumn> {
        vec![
            ImportColumn::new("name", "Name").required(),
            ImportColumn::new("status", "Status").kind(ImportKind::Bool),
            ImportColumn::new("price", "Price").kind(ImportKind::Number),
        ]
    }

    fn raw(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_headers_match_case_insensitively() {
        let table = ImportTable::from_raw(
            raw(&[&[" PRICE ", "name", "status"], &["9,5", "Size", "yes"]]),
            &columns(),
            "attrs.xlsx",
        )
        .unwrap();
        assert_eq!(table.rows, vec![json!({ "name": "Size", "status": true, "price": 9.5 })]);
        assert_eq!(table.unmapped_count(), 0);
        assert_eq!(table.column_mapping[0].file_index, Some(1));
    }

    #[test]
    fn test_empty_rows_are_dropped() {
        let table = ImportTable::from_raw(
            raw(&[&["Name"], &["  "], &["Color"], &[]]),
            &columns(),
            "a.csv",
        )
        .unwrap();
        assert_eq!(table.rows, vec![json!({ "name": "Color" })]);
        assert_eq!(table.unmapped_count(), 2);
    }

    #[test]
    fn test_missing_required_header() {
        let err = ImportTable::from_raw(raw(&[&["Status"], &["1"]]), &columns(), "a.csv").unwrap_err();
        assert_eq!(err, ImportError::MissingColumns(vec!["Name".into()]));
        assert_eq!(err.to_string(), "Missing columns: Name");
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(
            ImportTable::from_raw(vec![], &columns(), "a.csv").unwrap_err(),
            ImportError::Empty
        );
    }

    #[test]
    fn test_unparsable_number_stays_text() {
        assert_eq!(ImportKind::Number.convert("n/a"), json!("n/a"));
        assert_eq!(ImportKind::Number.convert("12"), json!(12));
    }
}
