//! Persisted storage snapshot format

use std::collections::BTreeMap;

use serde::Deserialize;

use super::record::RawFieldRecord;

/// Full stored configuration, keyed by table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StorageSnapshot {
    #[serde(flatten)]
    pub tables: BTreeMap<String, TableDefinition>,
}

/// Everything stored for one table: its elements, field records, storage
/// types and palette definitions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableDefinition {
    pub elements: BTreeMap<String, ElementDefinition>,
    pub tca: BTreeMap<String, RawFieldRecord>,
    /// Storage type strings keyed `field -> table -> field`.
    pub sql: BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>,
    pub palettes: BTreeMap<String, PaletteDefinition>,
}

/// A named, user-defined content-structure definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementDefinition {
    pub key: String,
    pub label: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    /// Top-level field keys in declared order.
    pub columns: Vec<String>,
    /// Display labels parallel to `columns`.
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaletteDefinition {
    pub label: String,
    pub showitem: Vec<String>,
}
