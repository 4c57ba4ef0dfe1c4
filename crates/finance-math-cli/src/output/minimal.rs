use serde_json::Value;

use super::{cell_text, result_of};

/// Headline field of each calculator, in priority order.
const PRIORITY_KEYS: [&str; 10] = [
    "monthly_payment",
    "maturity_amount",
    "future_value",
    "total_tax",
    "recommended",
    "realized_gain_loss",
    "progress_pct",
    "profit_loss",
    "total",
    "stats",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    let result_obj = result_of(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            match map.get(key) {
                Some(Value::Object(inner)) => {
                    // Nested summaries (portfolio stats) report their P/L
                    if let Some(val) = inner.get("profit_loss") {
                        return cell_text(val);
                    }
                }
                Some(val) if !val.is_null() => return cell_text(val),
                _ => {}
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, cell_text(val));
        }
    }

    cell_text(result_obj)
}
