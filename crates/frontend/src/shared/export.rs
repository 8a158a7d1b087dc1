//! CSV export of table rows, opened by Excel thanks to the BOM and `;`

use crate::shared::data_table::{cell_text, field_value, ColumnSchema};
use serde_json::Value;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    Empty,
    #[error("Download failed: {0}")]
    Browser(String),
}

fn browser_err(context: &str) -> impl Fn(wasm_bindgen::JsValue) -> ExportError + '_ {
    move |e| ExportError::Browser(format!("{}: {:?}", context, e))
}

/// Quote a cell holding the separator, quotes or line breaks
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// CSV text: BOM, header row of column headers, one line per row
pub fn build_csv(columns: &[ColumnSchema], rows: &[Value]) -> String {
    let mut csv = String::from('\u{FEFF}');

    let headers: Vec<String> = columns.iter().map(|c| escape_csv_cell(&c.header)).collect();
    csv.push_str(&headers.join(";"));
    csv.push('\n');

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| {
                let text = field_value(row, &c.key).and_then(cell_text).unwrap_or_default();
                escape_csv_cell(&text)
            })
            .collect();
        csv.push_str(&cells.join(";"));
        csv.push('\n');
    }
    csv
}

/// Download `rows` as `filename`
pub fn export_rows(columns: &[ColumnSchema], rows: &[Value], filename: &str) -> Result<(), ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }
    let blob = create_csv_blob(&build_csv(columns, rows))?;
    download_blob(&blob, filename)
}

/// Header-only file to fill in and import back
pub fn download_template(columns: &[ColumnSchema], filename: &str) -> Result<(), ExportError> {
    let blob = create_csv_blob(&build_csv(columns, &[]))?;
    download_blob(&blob, filename)
}

fn create_csv_blob(content: &str) -> Result<Blob, ExportError> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties).map_err(browser_err("create blob"))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), ExportError> {
    let missing = |what: &str| ExportError::Browser(format!("no {}", what));
    let window = web_sys::window().ok_or_else(|| missing("window"))?;
    let document = window.document().ok_or_else(|| missing("document"))?;
    let body = document.body().ok_or_else(|| missing("body"))?;

    let url = Url::create_object_url_with_blob(blob).map_err(browser_err("create object URL"))?;

    let anchor = document
        .create_element("a")
        .map_err(browser_err("create anchor"))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| ExportError::Browser("element is not an anchor".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(browser_err("style anchor"))?;

    body.append_child(&anchor).map_err(browser_err("append anchor"))?;
    anchor.click();
    body.remove_child(&anchor).map_err(browser_err("remove anchor"))?;

    Url::revoke_object_url(&url).map_err(browser_err("revoke object URL"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<ColumnSchema> {
        vec![
            ColumnSchema::new("name", "Name"),
            ColumnSchema::new("category", "Category"),
            ColumnSchema::new("price", "Price"),
        ]
    }

    #[test]
    fn test_csv_layout() {
        let rows = vec![
            json!({ "name": "Tee", "category": { "name": "Shirts" }, "price": 12.5 }),
            json!({ "name": "Cap; red", "price": null }),
        ];
        let csv = build_csv(&columns(), &rows);
        assert_eq!(
            csv,
            "\u{FEFF}Name;Category;Price\nTee;Shirts;12.5\n\"Cap; red\";;\n"
        );
    }

    #[test]
    fn test_template_is_header_only() {
        assert_eq!(build_csv(&columns(), &[]), "\u{FEFF}Name;Category;Price\n");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_csv_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv_cell("plain"), "plain");
    }
}
