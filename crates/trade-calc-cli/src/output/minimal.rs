use serde_json::Value;

use super::table::format_value;

/// Print just the key answer value from the output.
///
/// Heuristic: a `derived` marker names the answer directly (sync output);
/// otherwise look for well-known fields in priority order, then fall back
/// to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = ["profit_loss", "valid"];

    if let Value::Object(map) = result_obj {
        if let Some(Value::String(derived)) = map.get("derived") {
            if let Some(val) = map.get(derived.as_str()) {
                println!("{}", format_value(val));
                return;
            }
        }

        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_value(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}
