/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 14/10/26
 ******************************************************************************/

//! Deterministic query-string flattening.
//!
//! Nested objects become `key[sub]=value` pairs, keys are visited in ascending
//! order at every level, and pairs are joined with `&`. Two maps with the same
//! content always produce the same string.

use serde_json::{Map, Value};

pub fn flatten_query(params: &Map<String, Value>) -> String {
    flatten_pairs(params).join("&")
}

/// `key=value` pairs in emission order, before joining.
pub fn flatten_pairs(params: &Map<String, Value>) -> Vec<String> {
    let mut pairs = Vec::new();
    flatten_object(params, None, &mut pairs);
    pairs
}

fn flatten_object(object: &Map<String, Value>, prefix: Option<&str>, out: &mut Vec<String>) {
    let mut keys: Vec<&String> = object.keys().collect();
    keys.sort();
    for key in keys {
        let name = nested_name(prefix, &urlencoding::encode(key));
        flatten_value(&object[key.as_str()], &name, out);
    }
}

fn flatten_value(value: &Value, name: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(object) => flatten_object(object, Some(name), out),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(item, &nested_name(Some(name), &index.to_string()), out);
            }
        }
        scalar => out.push(format!("{}={}", name, urlencoding::encode(&scalar_text(scalar)))),
    }
}

fn nested_name(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}[{key}]"),
        None => key.to_string(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
