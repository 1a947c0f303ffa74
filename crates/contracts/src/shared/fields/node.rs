//! Normalized, UI-ready field node

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One node of the normalized field tree returned to the UI.
///
/// Built fresh on every request and discarded after serialization. `parent`
/// is a value snapshot of the immediate parent taken at recursion time, not
/// a live back-reference, so the tree never forms an ownership cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFieldNode {
    /// Prefixed or plain field identifier.
    pub key: String,
    /// Translated display label; absent when no element scope was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Canonical field kind name.
    pub name: String,
    /// Rendered icon markup for the kind.
    pub icon: String,
    pub description: String,
    /// Flattened and cleaned configuration under dotted-path keys.
    pub tca: Map<String, Value>,
    /// Physical storage type; absent for grouping and host-schema fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    /// Ordered children; empty unless the kind is a parent kind.
    pub fields: Vec<NormalizedFieldNode>,
    /// Snapshot of the parent node, serialized as `{}` for roots.
    #[serde(serialize_with = "serialize_parent")]
    pub parent: Option<Box<NormalizedFieldNode>>,
    /// Whether the field belongs to this extension rather than the host
    /// schema. Purely lexical on the identifier prefix.
    pub is_mask_field: bool,
    /// Always false for loaded fields; reserved for not-yet-persisted ones.
    pub new_field: bool,
}

fn serialize_parent<S>(
    parent: &Option<Box<NormalizedFieldNode>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match parent {
        Some(node) => node.serialize(serializer),
        None => Map::new().serialize(serializer),
    }
}
