//! Raw field records as persisted in the element storage

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

/// A stored attribute that is either a plain string or keyed by element.
///
/// Palette and inline members carry per-element values for `label` and
/// `inlineParent`, while fields used by a single element store them flat.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScopedString {
    Plain(String),
    PerElement(BTreeMap<String, String>),
}

impl ScopedString {
    pub fn resolve(&self, element_key: &str) -> Option<&str> {
        match self {
            Self::Plain(value) => Some(value),
            Self::PerElement(map) => map.get(element_key).map(String::as_str),
        }
    }
}

/// Sort position of a nested field, plain or keyed by element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScopedOrder {
    Plain(i64),
    PerElement(BTreeMap<String, i64>),
}

impl ScopedOrder {
    pub fn resolve(&self, element_key: &str) -> Option<i64> {
        match self {
            Self::Plain(value) => Some(*value),
            Self::PerElement(map) => map.get(element_key).copied(),
        }
    }
}

/// Structured `ctrl` section of inline records, superseding the legacy
/// `inlineIcon`/`inlineLabel` flat attributes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CtrlSection {
    pub iconfile: Option<String>,
    pub label: Option<String>,
}

/// One stored field record, exactly as it sits in the storage snapshot.
///
/// Every attribute except `key` is optional in old snapshots, so the whole
/// record deserializes with defaults and the normalizer substitutes empty
/// values where needed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawFieldRecord {
    /// Nested field configuration. Kept as a dynamic map because legacy
    /// snapshots carry keys the current version no longer knows; those only
    /// get discarded after flattening.
    pub config: Map<String, Value>,
    /// Field identifier without the reserved prefix.
    pub key: String,
    /// Prefixed identifier, attached by the storage layer when loading
    /// nested collections.
    #[serde(rename = "maskKey")]
    pub mask_key: Option<String>,
    /// Field kind token.
    pub name: Option<String>,
    pub description: Option<String>,
    pub l10n_mode: Option<String>,
    /// Marks a field inherited from the host schema.
    #[serde(rename = "coreField")]
    pub core_field: Option<i64>,
    /// Allowed content-type codes for content fields.
    #[serde(rename = "cTypes")]
    pub c_types: Option<Vec<String>>,
    #[serde(rename = "inPalette")]
    pub in_palette: Option<i64>,
    /// Key of the palette or inline field this record nests under.
    #[serde(rename = "inlineParent")]
    pub inline_parent: Option<ScopedString>,
    pub order: Option<ScopedOrder>,
    /// Display label for nested members, not covered by element `labels`.
    pub label: Option<ScopedString>,
    /// Legacy top-level file options, superseding nested config paths.
    #[serde(rename = "imageoverlayPalette")]
    pub imageoverlay_palette: Option<Value>,
    #[serde(rename = "allowedFileExtensions")]
    pub allowed_file_extensions: Option<String>,
    /// Legacy flat inline options, superseded by `ctrl`.
    #[serde(rename = "inlineIcon")]
    pub inline_icon: Option<String>,
    #[serde(rename = "inlineLabel")]
    pub inline_label: Option<String>,
    pub ctrl: Option<CtrlSection>,
}

impl RawFieldRecord {
    pub fn is_core_field(&self) -> bool {
        self.core_field.is_some()
    }
}
