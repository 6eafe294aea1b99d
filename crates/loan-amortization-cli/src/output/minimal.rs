use serde_json::Value;

use super::currency::{format_money_value, is_money_field};

/// Print just the headline figures, one per line.
///
/// Mirrors the classic calculator result label: monthly payment followed by
/// total interest paid when a schedule was built.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        println!("{}", format_minimal("", result_obj));
        return;
    };

    let labelled = [
        ("monthly_payment", "Monthly Payment"),
        ("total_interest_paid", "Total Interest Paid"),
        ("months_saved", "Months Saved"),
        ("interest_saved", "Interest Saved"),
        ("valid", "Valid"),
        ("reason", "Reason"),
    ];

    let mut printed = false;
    for (key, label) in labelled {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            println!("{}: {}", label, format_minimal(key, val));
            printed = true;
        }
    }

    if !printed {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(key, val));
        }
    }
}

fn format_minimal(key: &str, value: &Value) -> String {
    if is_money_field(key) {
        if let Some(money) = format_money_value(value) {
            return money;
        }
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
