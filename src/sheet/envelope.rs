// src/sheet/envelope.rs
//
// The gviz "publish as JSON" endpoint answers with something like
//
//     /*O_o*/
//     google.visualization.Query.setResponse({"version":"0.6",...,"table":{...}});
//
// We take everything after the first `(` through the last `}` as JSON.

use serde_json::Value;

use crate::error::EnvelopeError;

/// Column labels and cell values pulled out of an envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Slice the JSON payload out of the callback wrapper.
fn extract_payload(text: &str) -> Result<&str, EnvelopeError> {
    let start = text.find('(').map_or(0, |i| i + 1);
    let end = text
        .rfind('}')
        .map(|i| i + 1)
        .filter(|&end| end > start)
        .ok_or(EnvelopeError::NoPayload)?;
    Ok(&text[start..end])
}

/// Parse a raw envelope into headers and rows.
///
/// The table object and its `rows` list must both be present; anything else
/// missing is filled with empty strings.
pub fn parse_envelope(text: &str) -> Result<Table, EnvelopeError> {
    let doc: Value = serde_json::from_str(extract_payload(text)?)?;

    let table = doc
        .get("table")
        .filter(|t| t.is_object())
        .ok_or(EnvelopeError::MissingTable)?;
    let rows = table
        .get("rows")
        .and_then(Value::as_array)
        .ok_or(EnvelopeError::MissingRows)?;

    let headers = table
        .get("cols")
        .and_then(Value::as_array)
        .map(|cols| cols.iter().map(column_label).collect())
        .unwrap_or_default();

    Ok(Table {
        headers,
        rows: rows.iter().map(row_cells).collect(),
    })
}

fn column_label(col: &Value) -> String {
    col.get("label")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn row_cells(row: &Value) -> Vec<Value> {
    row.get("c")
        .and_then(Value::as_array)
        .map(|cells| cells.iter().map(cell_value).collect())
        .unwrap_or_default()
}

// null cells and null/missing `v` both become ""
fn cell_value(cell: &Value) -> Value {
    match cell.get("v") {
        Some(v) if !v.is_null() => v.clone(),
        _ => Value::String(String::new()),
    }
}
