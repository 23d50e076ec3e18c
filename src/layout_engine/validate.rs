//! Acceptance checks for layout trees coming from outside the engine.

use std::collections::HashSet;

use serde_json::Value;

use super::{LayoutError, LayoutTree, PaneId};

/// Shape check on an undecoded snapshot.
///
/// A branch only needs `direction`, `first` and `second` keys; its children
/// are not inspected here. [`decode_snapshot`] decodes into the typed tree
/// afterwards, which rejects malformed descendants.
pub fn is_well_formed(candidate: &Value) -> bool {
    match candidate {
        Value::Null | Value::String(_) => true,
        Value::Object(fields) => {
            ["direction", "first", "second"].iter().all(|key| fields.contains_key(*key))
        }
        _ => false,
    }
}

pub fn has_unique_identities(tree: &LayoutTree) -> bool { duplicate_identities(tree).is_empty() }

/// Identities that occur more than once, each reported once, in tree order.
pub fn duplicate_identities(tree: &LayoutTree) -> Vec<PaneId> {
    let Some(root) = tree else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    root.leaves()
        .filter(|id| !seen.insert(*id) && reported.insert(*id))
        .cloned()
        .collect()
}

pub fn ensure_unique_identities(tree: &LayoutTree) -> Result<(), LayoutError> {
    let duplicates = duplicate_identities(tree);
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(LayoutError::DuplicateIdentities(duplicates))
    }
}

/// Parses and validates a persisted snapshot.
pub fn decode_snapshot(text: &str) -> Result<LayoutTree, LayoutError> {
    let value: Value = serde_json::from_str(text).map_err(LayoutError::Parse)?;
    if !is_well_formed(&value) {
        return Err(LayoutError::Malformed);
    }
    let tree: LayoutTree = serde_json::from_value(value).map_err(LayoutError::Decode)?;
    ensure_unique_identities(&tree)?;
    Ok(tree)
}
