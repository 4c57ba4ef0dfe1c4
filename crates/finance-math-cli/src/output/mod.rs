pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of an envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// True for a non-empty array whose elements are all objects, e.g. an
/// amortization schedule or a yearly breakdown.
pub(crate) fn is_row_array(value: &Value) -> bool {
    matches!(value, Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object))
}

/// Split an object into scalar fields and row arrays.
pub(crate) fn partition_fields(map: &Map<String, Value>) -> (Vec<(&str, &Value)>, Vec<(&str, &Vec<Value>)>) {
    let mut scalars = Vec::new();
    let mut rows = Vec::new();
    for (key, val) in map {
        match val {
            Value::Array(items) if is_row_array(val) => rows.push((key.as_str(), items)),
            _ => scalars.push((key.as_str(), val)),
        }
    }
    (scalars, rows)
}

/// Render a JSON value as plain text for a single cell.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
