use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::types::ImportError;

/// SheetJS wrapper loaded by the host page: first sheet as an array of rows
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = parseExcelFile, catch)]
    pub fn parse_excel_file(data: &[u8]) -> Result<JsValue, JsValue>;
}

/// Read a `.xlsx`/`.csv` file into raw string rows, header row first
pub async fn read_excel_from_file(file: web_sys::File) -> Result<Vec<Vec<String>>, ImportError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ImportError::Read(format!("{:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let parsed = parse_excel_file(&bytes).map_err(|e| ImportError::Parse(format!("{:?}", e)))?;
    let rows: Vec<Vec<Value>> =
        serde_wasm_bindgen::from_value(parsed).map_err(|e| ImportError::Parse(e.to_string()))?;

    Ok(rows.iter().map(|row| row.iter().map(raw_cell).collect()).collect())
}

/// Spreadsheet cell as text; numbers keep their JSON spelling
pub(crate) fn raw_cell(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
