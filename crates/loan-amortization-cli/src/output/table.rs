use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::currency::{format_money_value, is_money_field};

/// Render a computation envelope as tables: scalar results first, then any
/// nested rows (schedule entries) or summaries, then warnings and methodology.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result_tables(result, map),
            _ => print_field_table(map),
        },
        Value::Array(arr) => print_row_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    let scalars: Map<String, Value> = result
        .iter()
        .filter(|(_, v)| !v.is_array() && !v.is_object())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !scalars.is_empty() {
        print_field_table(&scalars);
    }

    for (key, val) in result {
        match val {
            Value::Object(section) => {
                println!("\n{}:", heading(key));
                print_field_table(section);
            }
            Value::Array(rows) => {
                println!("\n{}:", heading(key));
                print_row_table(rows);
            }
            _ => {}
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([heading(key), format_cell(key, val)]);
    }
    println!("{}", Table::from(builder));
}

/// One row per element, e.g. one per schedule month.
fn print_row_table(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        if rows.is_empty() {
            println!("(empty)");
        }
        for item in rows {
            println!("{}", format_cell("", item));
        }
        return;
    };

    let keys: Vec<&String> = first.keys().collect();
    let mut builder = Builder::default();
    builder.push_record(keys.iter().map(|k| heading(k)));
    for item in rows {
        if let Value::Object(map) = item {
            builder.push_record(keys.iter().map(|k| {
                map.get(k.as_str())
                    .map(|v| format_cell(k, v))
                    .unwrap_or_default()
            }));
        }
    }
    println!("{}", Table::from(builder));
}

fn format_cell(key: &str, value: &Value) -> String {
    if is_money_field(key) {
        if let Some(money) = format_money_value(value) {
            return money;
        }
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// `total_interest_paid` -> `Total Interest Paid`
fn heading(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
