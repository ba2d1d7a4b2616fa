//! Aggregate-type to table-name resolution.

use std::collections::HashMap;

use serde::Deserialize;

/// Explicit aggregate-type to table-name overrides.
///
/// Supplied once at adapter construction and immutable thereafter. Types
/// without an entry fall back to [`derive_table_name`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TableMap {
    map: HashMap<String, String>,
}

impl TableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of an override.
    pub fn with(mut self, aggregate_type: impl Into<String>, table: impl Into<String>) -> Self {
        self.map.insert(aggregate_type.into(), table.into());
        self
    }

    /// Resolve the physical table for an aggregate type.
    ///
    /// An explicit entry is returned verbatim; otherwise the name is derived
    /// from the type's short name.
    pub fn resolve(&self, aggregate_type: &str) -> String {
        match self.map.get(aggregate_type) {
            Some(table) => table.clone(),
            None => derive_table_name(aggregate_type),
        }
    }
}

impl From<HashMap<String, String>> for TableMap {
    fn from(map: HashMap<String, String>) -> Self {
        Self { map }
    }
}

/// Derive the default snapshot table name for an aggregate type.
///
/// Dashes are normalized to underscores, the last `\`-separated namespace
/// segment is taken and lower-cased, and `_snapshot` is appended unless the
/// name already contains it. Pure; the caller must supply a non-empty type.
pub fn derive_table_name(aggregate_type: &str) -> String {
    let normalized = aggregate_type.replace('-', "_");
    let short = normalized.rsplit('\\').next().unwrap_or(&normalized);

    let mut table = short.to_lowercase();
    if !table.contains("_snapshot") {
        table.push_str("_snapshot");
    }
    table
}
