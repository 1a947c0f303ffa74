//! Display label resolution for fields within an element

use super::storage::FieldStorage;

/// Resolves the display label of a field within one element.
pub trait LabelResolver {
    fn get_label(&self, element_key: &str, field_key: &str, table: &str) -> String;
}

/// Label lookup over the storage snapshot.
///
/// Top-level fields carry their labels in the element's `labels` array,
/// parallel to `columns`. Palette and inline members are not element columns
/// and keep a (possibly per-element) `label` on the record itself.
pub struct FieldHelper<'a> {
    storage: &'a dyn FieldStorage,
}

impl<'a> FieldHelper<'a> {
    pub fn new(storage: &'a dyn FieldStorage) -> Self {
        Self { storage }
    }
}

impl LabelResolver for FieldHelper<'_> {
    fn get_label(&self, element_key: &str, field_key: &str, table: &str) -> String {
        let snapshot = self.storage.snapshot();

        if let Some(element) = snapshot
            .tables
            .get(table)
            .and_then(|table_def| table_def.elements.get(element_key))
        {
            if let Some(position) = element.columns.iter().position(|column| column == field_key) {
                if let Some(label) = element.labels.get(position) {
                    if !label.is_empty() {
                        return label.clone();
                    }
                }
            }
        }

        for table_def in snapshot.tables.values() {
            if let Some(record) = table_def.tca.get(field_key) {
                if let Some(label) = record
                    .label
                    .as_ref()
                    .and_then(|scoped| scoped.resolve(element_key))
                {
                    return label.to_string();
                }
            }
        }

        String::new()
    }
}
