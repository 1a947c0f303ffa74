//! External defaults and allowed-option tables, keyed by field kind

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Per-kind default configuration values, keyed by kind name.
pub type DefaultsTable = BTreeMap<String, KindDefaults>;

/// Defaults for one field kind. `tca_in` is merged into loaded
/// configurations where a key is absent; `tca_out` belongs to the save path
/// and is carried for format completeness only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KindDefaults {
    pub tca_in: Map<String, Value>,
    pub tca_out: Map<String, Value>,
}

/// Allowed-option table for one kind: tab name to option rows. Each row maps
/// a dotted option key to its render metadata; the union of row keys is the
/// set of configuration keys that survive cleanup.
pub type TabConfig = BTreeMap<String, Vec<Map<String, Value>>>;
