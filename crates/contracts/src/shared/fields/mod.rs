//! Field model shared between the storage layer, the normalizer and the UI
//!
//! This module describes both sides of the transformation: the raw, versioned
//! records as they sit in the element storage (`RawFieldRecord`,
//! `StorageSnapshot`) and the normalized, UI-ready node tree produced from
//! them (`NormalizedFieldNode`). Field kinds form a closed enumeration with
//! capability flags instead of open string dispatch.

mod defaults;
mod kind;
mod node;
mod record;
mod snapshot;

pub use defaults::{DefaultsTable, KindDefaults, TabConfig};
pub use kind::FieldKind;
pub use node::NormalizedFieldNode;
pub use record::{CtrlSection, RawFieldRecord, ScopedOrder, ScopedString};
pub use snapshot::{ElementDefinition, PaletteDefinition, StorageSnapshot, TableDefinition};
