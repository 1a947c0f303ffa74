//! Defaults and allowed-option tables, keyed by field kind

use std::collections::BTreeMap;

use contracts::shared::fields::{DefaultsTable, FieldKind, TabConfig};
use serde_json::Value;

/// Versioned defaults provider: per-kind incoming configuration defaults and
/// the allowed-option table used by cleanup. Read-only within a
/// normalization pass.
pub trait ConfigurationLoader {
    fn load_defaults(&self) -> &DefaultsTable;
    fn load_tab(&self, kind: FieldKind) -> Option<&TabConfig>;
}

/// Loader over deserialized JSON tables.
pub struct JsonConfigurationLoader {
    defaults: DefaultsTable,
    tabs: BTreeMap<String, TabConfig>,
}

impl JsonConfigurationLoader {
    pub fn new(defaults: DefaultsTable, tabs: BTreeMap<String, TabConfig>) -> Self {
        Self { defaults, tabs }
    }

    pub fn from_values(defaults: Value, tabs: Value) -> serde_json::Result<Self> {
        Ok(Self::new(
            serde_json::from_value(defaults)?,
            serde_json::from_value(tabs)?,
        ))
    }
}

impl ConfigurationLoader for JsonConfigurationLoader {
    fn load_defaults(&self) -> &DefaultsTable {
        &self.defaults
    }

    fn load_tab(&self, kind: FieldKind) -> Option<&TabConfig> {
        self.tabs.get(kind.as_str())
    }
}
