use serde_json::Value;
use std::io;

use super::{cell_text, partition_fields, result_of};

/// Write output as CSV to stdout.
///
/// Results carrying a row array (amortization schedule, yearly breakdown,
/// expense categories) export that array; otherwise a two-column
/// field/value listing of the scalar fields is written.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    if let Err(e) = write_csv(&mut wtr, result_of(value)) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => {
            let (scalars, rows) = partition_fields(map);
            if let Some((_, items)) = rows.first() {
                write_rows(wtr, items)?;
            } else {
                wtr.write_record(["field", "value"])?;
                for (key, val) in scalars {
                    wtr.write_record([key, cell_text(val).as_str()])?;
                }
            }
        }
        Value::Array(arr) => write_rows(wtr, arr)?,
        _ => wtr.write_record([cell_text(value)])?,
    }
    wtr.flush()?;
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([cell_text(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(cell_text).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}
