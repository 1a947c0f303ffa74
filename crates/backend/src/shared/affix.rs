//! Reserved identifier prefix for extension-owned fields

pub const MASK_PREFIX: &str = "tx_mask_";

/// Whether the identifier belongs to this extension rather than the host
/// schema. The test is purely lexical.
pub fn has_mask_prefix(key: &str) -> bool {
    key.starts_with(MASK_PREFIX)
}

pub fn add_mask_prefix(key: &str) -> String {
    format!("{MASK_PREFIX}{key}")
}
