use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use super::flatten;

/// Format output as a table using the tabled crate.
///
/// Nested sections (`mtf`, `stop_loss`, `errors`) become `section.field`
/// rows; decimal values are shown to 2 dp.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    print_flat_object(result);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in flatten(map) {
            builder.push_record([key, format_value(&val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    } else {
        println!("{}", format_value(value));
    }
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => display_decimal(s).unwrap_or_else(|| s.clone()),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Decimals arrive as strings; show them with two fixed decimals.
fn display_decimal(s: &str) -> Option<String> {
    let d = Decimal::from_str(s).ok()?;
    let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Some(format!("{:.2}", rounded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_strings_rounded() {
        assert_eq!(format_value(&Value::String("3.452054794520547945".into())), "3.45");
        assert_eq!(format_value(&Value::String("1000".into())), "1000.00");
        assert_eq!(format_value(&Value::String("HDFCBANK".into())), "HDFCBANK");
        assert_eq!(format_value(&Value::Null), "-");
    }
}
