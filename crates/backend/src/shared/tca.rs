//! Flattening of nested field configurations into dotted-path keys

use serde_json::{Map, Value};

/// Flattens a nested field configuration into a map of dotted-path keys,
/// each prefixed with `config.`.
///
/// Objects recurse into their keys, arrays of containers recurse with
/// numeric path segments, and arrays of scalars stay as list leaves (a list
/// of allowed content-type codes keeps its flattened key, it is not itself
/// exploded).
pub fn flatten_config(config: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    for (key, value) in config {
        flatten_value(&format!("config.{key}"), value, &mut flat);
    }
    flat
}

fn flatten_value(path: &str, value: &Value, flat: &mut Map<String, Value>) {
    match value {
        Value::Object(nested) => {
            for (key, inner) in nested {
                flatten_value(&format!("{path}.{key}"), inner, flat);
            }
        }
        Value::Array(items) if items.iter().any(|item| item.is_object() || item.is_array()) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(&format!("{path}.{index}"), item, flat);
            }
        }
        leaf => {
            flat.insert(path.to_string(), leaf.clone());
        }
    }
}
