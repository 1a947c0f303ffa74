//! Storage collaborator over the persisted configuration snapshot

use contracts::shared::fields::{RawFieldRecord, StorageSnapshot};
use serde_json::Value;

use super::labels::{FieldHelper, LabelResolver};
use crate::shared::affix;

/// Read access to the stored element configuration.
///
/// All lookups are synchronous and side-effect free; missing data resolves
/// to empty defaults rather than errors.
pub trait FieldStorage {
    /// Full configuration snapshot.
    fn snapshot(&self) -> &StorageSnapshot;

    /// Ordered raw records for one element's declared columns.
    fn load_element(&self, table: &str, element_key: &str) -> Vec<(String, RawFieldRecord)>;

    /// One field's raw record.
    fn load_field(&self, table: &str, key: &str) -> Option<RawFieldRecord>;

    /// Nested records of a palette or inline field, ordered by their scoped
    /// `order` attribute.
    fn load_inline_fields(&self, parent_key: &str, element_key: &str)
        -> Vec<(String, RawFieldRecord)>;

    /// Field kind token for classification.
    fn form_type(&self, field_key: &str, element_key: &str, table: &str) -> String;

    /// Physical storage type string for a field.
    fn sql_type(&self, table: &str, key: &str) -> Option<String>;

    /// First non-empty label for a field across all elements using it.
    fn find_first_non_empty_label(&self, table: &str, key: &str) -> String;
}

/// Snapshot-backed storage, deserialized from the stored JSON.
pub struct JsonStorage {
    snapshot: StorageSnapshot,
}

impl JsonStorage {
    pub fn new(snapshot: StorageSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_value(value)?))
    }
}

impl FieldStorage for JsonStorage {
    fn snapshot(&self) -> &StorageSnapshot {
        &self.snapshot
    }

    fn load_element(&self, table: &str, element_key: &str) -> Vec<(String, RawFieldRecord)> {
        let Some(table_def) = self.snapshot.tables.get(table) else {
            return Vec::new();
        };
        let Some(element) = table_def.elements.get(element_key) else {
            return Vec::new();
        };
        element
            .columns
            .iter()
            .map(|column| {
                let record = table_def.tca.get(column).cloned().unwrap_or_else(|| {
                    // A column without a stored record is a plain host field.
                    tracing::warn!("No stored record for element column '{}'", column);
                    RawFieldRecord {
                        key: column.clone(),
                        core_field: Some(1),
                        ..Default::default()
                    }
                });
                (column.clone(), record)
            })
            .collect()
    }

    fn load_field(&self, table: &str, key: &str) -> Option<RawFieldRecord> {
        self.snapshot.tables.get(table)?.tca.get(key).cloned()
    }

    fn load_inline_fields(
        &self,
        parent_key: &str,
        element_key: &str,
    ) -> Vec<(String, RawFieldRecord)> {
        let mut nested = Vec::new();
        for table_def in self.snapshot.tables.values() {
            for (key, record) in &table_def.tca {
                let parent = record
                    .inline_parent
                    .as_ref()
                    .and_then(|scoped| scoped.resolve(element_key));
                if parent != Some(parent_key) {
                    continue;
                }
                let mut record = record.clone();
                record.mask_key = Some(affix::add_mask_prefix(&record.key));
                let order = record
                    .order
                    .as_ref()
                    .and_then(|scoped| scoped.resolve(element_key))
                    .unwrap_or(0);
                nested.push((order, key.clone(), record));
            }
        }
        nested.sort_by_key(|(order, _, _)| *order);
        nested
            .into_iter()
            .map(|(_, key, record)| (key, record))
            .collect()
    }

    fn form_type(&self, field_key: &str, _element_key: &str, table: &str) -> String {
        let in_table = self
            .snapshot
            .tables
            .get(table)
            .and_then(|table_def| table_def.tca.get(field_key))
            .and_then(|record| record.name.clone());
        if let Some(name) = in_table {
            return name;
        }
        for table_def in self.snapshot.tables.values() {
            if let Some(name) = table_def
                .tca
                .get(field_key)
                .and_then(|record| record.name.clone())
            {
                return name;
            }
        }
        // Host-schema fields without a stored record render as plain input.
        "string".to_string()
    }

    fn sql_type(&self, table: &str, key: &str) -> Option<String> {
        self.snapshot
            .tables
            .get(table)?
            .sql
            .get(key)?
            .get(table)?
            .get(key)
            .cloned()
    }

    fn find_first_non_empty_label(&self, table: &str, key: &str) -> String {
        let Some(table_def) = self.snapshot.tables.get(table) else {
            return String::new();
        };
        let helper = FieldHelper::new(self);
        // Elements are scanned in lexicographic key order.
        for element_key in table_def.elements.keys() {
            let label = helper.get_label(element_key, key, table);
            if !label.is_empty() {
                return label;
            }
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn storage() -> JsonStorage {
        JsonStorage::from_value(json!({
            "tt_content": {
                "elements": {
                    "element1": {
                        "key": "element1",
                        "label": "Element 1",
                        "columns": ["tx_mask_field1", "header"],
                        "labels": ["Field 1", "Core Header"]
                    },
                    "element2": {
                        "key": "element2",
                        "label": "Element 2",
                        "columns": ["tx_mask_field1"],
                        "labels": ["Field 1 Alt"]
                    }
                },
                "tca": {
                    "tx_mask_field1": {
                        "key": "field1",
                        "name": "string",
                        "config": { "type": "input" }
                    },
                    "tx_mask_palette1": {
                        "key": "palette1",
                        "name": "palette",
                        "config": { "type": "palette" }
                    },
                    "tx_mask_field2": {
                        "key": "field2",
                        "name": "integer",
                        "config": { "type": "input" },
                        "inPalette": 1,
                        "inlineParent": { "element1": "tx_mask_palette1" },
                        "order": { "element1": 2 }
                    },
                    "header": {
                        "key": "header",
                        "name": "string",
                        "coreField": 1,
                        "inPalette": 1,
                        "inlineParent": { "element1": "tx_mask_palette1" },
                        "order": { "element1": 1 }
                    }
                },
                "sql": {
                    "tx_mask_field1": {
                        "tt_content": { "tx_mask_field1": "tinytext" }
                    }
                }
            },
            "tx_mask_inline1": {
                "tca": {
                    "tx_mask_child1": {
                        "key": "child1",
                        "name": "string",
                        "config": { "type": "input" },
                        "inlineParent": "tx_mask_inline1",
                        "order": 1
                    }
                },
                "sql": {
                    "tx_mask_child1": {
                        "tx_mask_inline1": { "tx_mask_child1": "tinytext" }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_load_element_preserves_column_order() {
        let keys: Vec<String> = storage()
            .load_element("tt_content", "element1")
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["tx_mask_field1", "header"]);
    }

    #[test]
    fn test_load_element_synthesizes_missing_core_record() {
        let snapshot = json!({
            "tt_content": {
                "elements": {
                    "element1": { "key": "element1", "columns": ["bodytext"], "labels": ["Body"] }
                }
            }
        });
        let fields = JsonStorage::from_value(snapshot)
            .unwrap()
            .load_element("tt_content", "element1");
        assert_eq!(fields.len(), 1);
        assert!(fields[0].1.is_core_field());
        assert_eq!(fields[0].1.key, "bodytext");
    }

    #[test]
    fn test_load_element_unknown_element_is_empty() {
        assert!(storage().load_element("tt_content", "nope").is_empty());
        assert!(storage().load_element("nope", "element1").is_empty());
    }

    #[test]
    fn test_load_inline_fields_scoped_by_element_and_ordered() {
        let fields = storage().load_inline_fields("tx_mask_palette1", "element1");
        let keys: Vec<&str> = fields.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["header", "tx_mask_field2"]);
        // Another element does not see the palette members.
        assert!(storage()
            .load_inline_fields("tx_mask_palette1", "element2")
            .is_empty());
    }

    #[test]
    fn test_load_inline_fields_attaches_mask_key() {
        let fields = storage().load_inline_fields("tx_mask_inline1", "element1");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].1.mask_key.as_deref(), Some("tx_mask_child1"));
    }

    #[test]
    fn test_form_type_falls_back_to_string() {
        let storage = storage();
        assert_eq!(storage.form_type("tx_mask_field2", "element1", "tt_content"), "integer");
        // Record lives in another table.
        assert_eq!(storage.form_type("tx_mask_child1", "element1", "tt_content"), "string");
        // No record anywhere: host field.
        assert_eq!(storage.form_type("bodytext", "element1", "tt_content"), "string");
    }

    #[test]
    fn test_sql_type_lookup() {
        let storage = storage();
        assert_eq!(
            storage.sql_type("tt_content", "tx_mask_field1").as_deref(),
            Some("tinytext")
        );
        assert_eq!(storage.sql_type("tt_content", "tx_mask_palette1"), None);
    }

    #[test]
    fn test_find_first_non_empty_label_scans_elements_in_key_order() {
        let storage = storage();
        assert_eq!(
            storage.find_first_non_empty_label("tt_content", "tx_mask_field1"),
            "Field 1"
        );
        assert_eq!(storage.find_first_non_empty_label("tt_content", "unknown"), "");
    }
}
