//! Physical name derivation
//!
//! Table and index names are derived, never configured per-name. Logical ids
//! are lowercase dash-separated (`"course"`, `"source-id-crm"`); physical
//! names are the camel-cased ids assembled with a deployment prefix.

use std::collections::BTreeMap;

use courseloop_core::{ReconcileError, Result};

/// Camel-case a lowercase dash-separated id: `"source-id-crm"` ->
/// `"SourceIdCrm"`.
#[must_use]
pub fn dash_to_camel(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    for segment in id.split('-') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars);
        }
    }
    out
}

/// The physical names for one entity's slice of the single table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreNames {
    /// Physical table name.
    pub table: String,
    global: BTreeMap<String, String>,
    local: BTreeMap<String, String>,
}

impl StoreNames {
    /// Look up the physical name of a global index by its logical id.
    pub fn global_index(&self, index_id: &str) -> Result<&str> {
        self.global.get(index_id).map(String::as_str).ok_or_else(|| {
            ReconcileError::request_invalid(format!("unknown global index: {index_id}"))
        })
    }

    /// Look up the physical name of a local index by its logical id.
    pub fn local_index(&self, index_id: &str) -> Result<&str> {
        self.local.get(index_id).map(String::as_str).ok_or_else(|| {
            ReconcileError::request_invalid(format!("unknown local index: {index_id}"))
        })
    }
}

/// Derive every physical name for one entity up front.
///
/// Table: `{prefix}{TableId}Table`. Index:
/// `{prefix}{TableId}{EntityId}{IndexId}GlobalIndex` (or `LocalIndex`).
/// Pure; the only name logic in the crate.
#[must_use]
pub fn derive_names(
    prefix: &str,
    entity_id: &str,
    table_id: &str,
    global_index_ids: &[&str],
    local_index_ids: &[&str],
) -> StoreNames {
    let table_camel = dash_to_camel(table_id);
    let entity_camel = dash_to_camel(entity_id);
    let index_name = |index_id: &str, scope: &str| {
        format!(
            "{prefix}{table_camel}{entity_camel}{}{scope}",
            dash_to_camel(index_id)
        )
    };
    StoreNames {
        table: format!("{prefix}{table_camel}Table"),
        global: global_index_ids
            .iter()
            .map(|id| ((*id).to_string(), index_name(id, "GlobalIndex")))
            .collect(),
        local: local_index_ids
            .iter()
            .map(|id| ((*id).to_string(), index_name(id, "LocalIndex")))
            .collect(),
    }
}
