//! Field loading operations
//!
//! The two read operations of the field editor: loading the full field tree
//! of one element and loading a single field. Both return plain JSON
//! documents; the HTTP transport around them lives with the host.

use serde_json::{json, Value};

use crate::shared::fields::{FieldNormalizer, NormalizeError};

/// Loads the normalized field tree of one element.
///
/// Returns `{ "fields": [...] }` with one entry per declared column, in the
/// element's declared order.
pub fn load_element(
    normalizer: &FieldNormalizer<'_>,
    table: &str,
    element_key: &str,
) -> Result<Value, NormalizeError> {
    tracing::debug!("Loading fields of element '{}' in '{}'", element_key, table);
    let fields = normalizer.storage().load_element(table, element_key);
    let nodes = normalizer.normalize(fields, table, element_key)?;
    Ok(json!({ "fields": nodes }))
}

/// Loads a single field outside any element scope.
///
/// Returns `{ "field": {...} }` with the `label` taken from the first
/// non-empty label across all elements using the field.
pub fn load_field(
    normalizer: &FieldNormalizer<'_>,
    table: &str,
    key: &str,
) -> Result<Value, NormalizeError> {
    tracing::debug!("Loading field '{}' in '{}'", key, table);
    let record = normalizer
        .storage()
        .load_field(table, key)
        .ok_or_else(|| NormalizeError::FieldNotFound {
            table: table.to_string(),
            key: key.to_string(),
        })?;
    let mut nodes = normalizer.normalize(vec![(key.to_string(), record)], table, "")?;
    let mut node = nodes.pop().ok_or_else(|| NormalizeError::FieldNotFound {
        table: table.to_string(),
        key: key.to_string(),
    })?;
    node.label = Some(normalizer.storage().find_first_non_empty_label(table, key));
    Ok(json!({ "field": node }))
}
