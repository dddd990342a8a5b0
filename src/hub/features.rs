//! Text rendering of dataset viewer feature schemas.
//!
//! The viewer serializes features as nested JSON objects tagged with
//! `_type`. The rendering mirrors how the schema reads in dataset cards:
//! `{'text': Value('string'), 'label': ClassLabel(names=['neg', 'pos'])}`.

use serde_json::{Map, Value};

/// Render a feature schema as a single line of text.
pub fn render_features(features: &Value) -> String {
    let mut out = String::new();
    render_value(features, &mut out);
    out
}

fn render_value(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => match map.get("_type").and_then(Value::as_str) {
            Some(kind) => render_typed(kind, map, out),
            None => render_struct(map, out),
        },
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(item, out);
            }
            out.push(']');
        }
        Value::String(text) => push_quoted(text, out),
        other => out.push_str(&other.to_string()),
    }
}

fn render_struct(map: &Map<String, Value>, out: &mut String) {
    out.push('{');
    for (i, (name, feature)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        push_quoted(name, out);
        out.push_str(": ");
        render_value(feature, out);
    }
    out.push('}');
}

fn render_typed(kind: &str, map: &Map<String, Value>, out: &mut String) {
    out.push_str(kind);
    out.push('(');
    match kind {
        "Value" => {
            if let Some(dtype) = map.get("dtype").and_then(Value::as_str) {
                push_quoted(dtype, out);
            }
        }
        "ClassLabel" => {
            out.push_str("names=");
            render_value(map.get("names").unwrap_or(&Value::Array(Vec::new())), out);
        }
        "Sequence" | "List" | "LargeList" => {
            if let Some(inner) = map.get("feature") {
                render_value(inner, out);
            }
            if let Some(length) = map.get("length").and_then(Value::as_i64) {
                if length >= 0 {
                    out.push_str(&format!(", length={length}"));
                }
            }
        }
        _ => {
            let mut first = true;
            for (key, field) in map.iter().filter(|(key, _)| key.as_str() != "_type") {
                if !first {
                    out.push_str(", ");
                }
                first = false;
                out.push_str(key);
                out.push('=');
                render_value(field, out);
            }
        }
    }
    out.push(')');
}

fn push_quoted(text: &str, out: &mut String) {
    out.push('\'');
    out.push_str(&text.replace('\'', "\\'"));
    out.push('\'');
}
