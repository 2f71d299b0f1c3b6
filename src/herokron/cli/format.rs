//! Indented `[*]` rendering of nested data, used for every value herokron prints.
//!
//! ```text
//! [*] keys:
//!     [*] <api-key>:
//!         [*] app-a
//!         [*] app-b
//! [*] color:  7762880
//! ```

use serde_json::{Map, Value};

fn prefix(depth: usize) -> String {
    format!("{}[*] ", "\t".repeat(depth))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Object(map) => format_map(map, 0),
        Value::Array(items) => format_list(items, 0),
        other => scalar(other),
    }
}

fn format_map(map: &Map<String, Value>, depth: usize) -> String {
    let start = prefix(depth);
    map.iter()
        .map(|(key, value)| match value {
            Value::Object(inner) => format!("{}{}:\n{}", start, key, format_map(inner, depth + 1)),
            Value::Array(items) => format!("{}{}:\n{}", start, key, format_list(items, depth + 1)),
            other => format!("{}{}:\t{}", start, key, scalar(other)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_list(items: &[Value], depth: usize) -> String {
    let start = prefix(depth);
    // Lists of maps stay at this depth; anything else nests one level deeper.
    let nested = if items.iter().all(Value::is_object) {
        depth
    } else {
        depth + 1
    };
    items
        .iter()
        .map(|item| match item {
            Value::Object(inner) => format_map(inner, nested),
            Value::Array(inner) => format_list(inner, nested),
            other => format!("{}{}", start, scalar(other)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
