//! Recursive normalization of stored field records into the UI field tree

use std::collections::HashSet;

use contracts::shared::fields::{
    DefaultsTable, FieldKind, NormalizedFieldNode, RawFieldRecord, TabConfig,
};
use serde_json::{Map, Value};
use thiserror::Error;

use super::labels::LabelResolver;
use super::loader::ConfigurationLoader;
use super::storage::FieldStorage;
use crate::shared::{affix, date, tca};

/// Nested config path for file extensions before they moved to root level.
const LEGACY_EXTENSIONS_PATH: &str = "config.filter.0.parameters.allowedFileExtensions";

/// Renders backend icon markup for an icon identifier.
pub trait IconRenderer {
    fn render(&self, identifier: &str) -> String;
}

/// Translates `LLL`-prefixed references against the localization catalog.
pub trait Localizer {
    fn translate(&self, reference: &str) -> Option<String>;
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The stored kind token matches no known field kind. This is a
    /// configuration-integrity error and aborts the whole request.
    #[error("unknown field kind token '{0}'")]
    UnknownFieldKind(String),
    #[error("field '{key}' not found in table '{table}'")]
    FieldNotFound { table: String, key: String },
}

/// Turns raw field records into normalized field nodes, resolving nested
/// palette/inline children, legacy-format migration and per-kind defaults.
///
/// Collaborators are injected read-only; a single pass is a pure transform
/// over already-stored data.
pub struct FieldNormalizer<'a> {
    storage: &'a dyn FieldStorage,
    labels: &'a dyn LabelResolver,
    icons: &'a dyn IconRenderer,
    localizer: &'a dyn Localizer,
    loader: &'a dyn ConfigurationLoader,
}

impl<'a> FieldNormalizer<'a> {
    pub fn new(
        storage: &'a dyn FieldStorage,
        labels: &'a dyn LabelResolver,
        icons: &'a dyn IconRenderer,
        localizer: &'a dyn Localizer,
        loader: &'a dyn ConfigurationLoader,
    ) -> Self {
        Self {
            storage,
            labels,
            icons,
            localizer,
            loader,
        }
    }

    pub fn storage(&self) -> &dyn FieldStorage {
        self.storage
    }

    /// Normalizes an ordered collection of raw records into the field tree.
    ///
    /// Pass an empty `element_key` when the fields are loaded outside an
    /// element scope; labels are skipped in that case.
    pub fn normalize(
        &self,
        fields: Vec<(String, RawFieldRecord)>,
        table: &str,
        element_key: &str,
    ) -> Result<Vec<NormalizedFieldNode>, NormalizeError> {
        // The defaults table is loaded once and reused down the recursion.
        let defaults = self.loader.load_defaults();
        self.add_fields(fields, table, element_key, None, defaults)
    }

    fn add_fields(
        &self,
        fields: Vec<(String, RawFieldRecord)>,
        table: &str,
        element_key: &str,
        parent: Option<&NormalizedFieldNode>,
        defaults: &DefaultsTable,
    ) -> Result<Vec<NormalizedFieldNode>, NormalizeError> {
        let mut nested_fields = Vec::with_capacity(fields.len());

        for (map_key, mut field) in fields {
            // Nested records carry their own key; root records are keyed by
            // the collection.
            let key = if parent.is_some() {
                if field.is_core_field() {
                    field.key.clone()
                } else {
                    field.mask_key.clone().unwrap_or_else(|| field.key.clone())
                }
            } else {
                map_key
            };

            let label = if element_key.is_empty() {
                None
            } else {
                let raw = self.labels.get_label(element_key, &key, table);
                Some(self.translate_label(raw))
            };

            self.migrate_date_ranges(&mut field);

            let token = self.storage.form_type(&key, element_key, table);
            let kind = FieldKind::parse(&token)
                .ok_or_else(|| NormalizeError::UnknownFieldKind(token.clone()))?;

            let is_mask_field = affix::has_mask_prefix(&key);
            let mut new_field = NormalizedFieldNode {
                key,
                label,
                name: kind.as_str().to_string(),
                icon: self
                    .icons
                    .render(&format!("mask-fieldtype-{}", kind.as_str())),
                description: field.description.clone().unwrap_or_default(),
                parent: parent.map(|node| Box::new(node.clone())),
                is_mask_field,
                ..Default::default()
            };

            // Host-schema fields are listed for positional context only and
            // are never expanded.
            if !new_field.is_mask_field {
                nested_fields.push(new_field);
                continue;
            }

            if !kind.is_grouping_field() {
                new_field.sql = Some(
                    self.storage
                        .sql_type(table, &new_field.key)
                        .unwrap_or_else(|| {
                            tracing::warn!(
                                "No sql type stored for '{}' in '{}'",
                                new_field.key,
                                table
                            );
                            String::new()
                        }),
                );
                new_field.tca = tca::flatten_config(&field.config);
                new_field.tca.insert(
                    "l10n_mode".to_string(),
                    Value::String(field.l10n_mode.clone().unwrap_or_default()),
                );
            }

            if kind == FieldKind::Timestamp {
                migrate_timestamps(&mut new_field.tca);
            }

            if kind == FieldKind::File {
                new_field.tca.insert(
                    "imageoverlayPalette".to_string(),
                    field.imageoverlay_palette.clone().unwrap_or(Value::from(1)),
                );
                // The path for allowedFileExtensions moved to root level;
                // the old nested path is migrated and removed.
                let legacy = new_field.tca.remove(LEGACY_EXTENSIONS_PATH);
                let extensions = field
                    .allowed_file_extensions
                    .clone()
                    .map(Value::String)
                    .or(legacy)
                    .unwrap_or_else(|| Value::String(String::new()));
                new_field
                    .tca
                    .insert("allowedFileExtensions".to_string(), extensions);
            }

            if kind == FieldKind::Content {
                new_field.tca.insert(
                    "cTypes".to_string(),
                    Value::from(field.c_types.clone().unwrap_or_default()),
                );
            }

            // Kind defaults fill gaps only; existing values win.
            if let Some(kind_defaults) = defaults.get(kind.as_str()) {
                for (tca_key, default_value) in &kind_defaults.tca_in {
                    new_field
                        .tca
                        .entry(tca_key.clone())
                        .or_insert_with(|| default_value.clone());
                }
            }

            if kind == FieldKind::Inline {
                let ctrl = field.ctrl.clone().unwrap_or_default();
                new_field.tca.insert(
                    "ctrl.iconfile".to_string(),
                    Value::String(
                        ctrl.iconfile
                            .or_else(|| field.inline_icon.clone())
                            .unwrap_or_default(),
                    ),
                );
                new_field.tca.insert(
                    "ctrl.label".to_string(),
                    Value::String(
                        ctrl.label
                            .or_else(|| field.inline_label.clone())
                            .unwrap_or_default(),
                    ),
                );
            }

            new_field.tca = clean_up_config(new_field.tca, self.loader.load_tab(kind));

            if kind.is_parent_field() {
                // Inline children live in their own table; palette members
                // stay within the current one.
                let inline_table = if kind == FieldKind::Inline {
                    new_field.key.clone()
                } else {
                    table.to_string()
                };
                new_field.fields = self.add_fields(
                    self.storage.load_inline_fields(&new_field.key, element_key),
                    &inline_table,
                    element_key,
                    Some(&new_field),
                    defaults,
                )?;
            }

            nested_fields.push(new_field);
        }

        Ok(nested_fields)
    }

    /// Converts old `YYYY-MM-DD` range bounds of date/datetime fields to the
    /// display format before the config is flattened.
    fn migrate_date_ranges(&self, field: &mut RawFieldRecord) {
        let db_type = match field.config.get("dbType").and_then(Value::as_str) {
            Some(db_type @ ("date" | "datetime")) => db_type.to_string(),
            _ => return,
        };
        let Some(Value::Object(range)) = field.config.get_mut("range") else {
            return;
        };
        for bound in ["lower", "upper"] {
            let migrated = match range.get(bound) {
                Some(Value::String(value)) if date::is_old_date_format(value) => {
                    Some(date::convert_old_to_new_format(&db_type, value))
                }
                _ => None,
            };
            if let Some(value) = migrated {
                range.insert(bound.to_string(), Value::String(value));
            }
        }
    }

    /// Resolves `LLL`-prefixed references against the localization catalog;
    /// everything else passes through verbatim.
    fn translate_label(&self, key: String) -> String {
        if key.is_empty() || !key.starts_with("LLL") {
            return key;
        }
        match self.localizer.translate(&key) {
            Some(result) if !result.is_empty() => result,
            _ => key,
        }
    }
}

/// Removes all configuration options that do not appear in the kind's
/// allowed-option table. This is a projection, not a validation: dropped
/// keys are silent, and filtering is idempotent.
fn clean_up_config(config: Map<String, Value>, tab: Option<&TabConfig>) -> Map<String, Value> {
    let mut allowed: HashSet<&String> = HashSet::new();
    if let Some(tab_config) = tab {
        for rows in tab_config.values() {
            for row in rows {
                allowed.extend(row.keys());
            }
        }
    }
    config
        .into_iter()
        .filter(|(key, _)| allowed.contains(key))
        .collect()
}

/// Converts legacy Unix-timestamp values of a timestamp field to the display
/// date format. `config.eval` is then forced to the plain date mode; the
/// upgrade is one-way.
fn migrate_timestamps(tca: &mut Map<String, Value>) {
    let eval = tca
        .get("config.eval")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let mut migrated = false;
    for path in ["config.default", "config.range.lower", "config.range.upper"] {
        let Some(timestamp) = tca
            .get(path)
            .and_then(Value::as_i64)
            .filter(|timestamp| *timestamp != 0)
        else {
            continue;
        };
        tca.insert(
            path.to_string(),
            Value::String(date::convert_timestamp_to_date(&eval, timestamp)),
        );
        migrated = true;
    }
    if migrated {
        let mode = if date::eval_contains(&eval, "datetime") {
            "datetime"
        } else {
            "date"
        };
        tca.insert("config.eval".to_string(), Value::String(mode.to_string()));
    }
}
