//! Saved document types.

use std::collections::{BTreeMap, BTreeSet};

use codetree_model::{DepthBounds, DisplaySettings, NodePath, Selection, is_valid_segment};
use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, Result};

/// A saved tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    /// Root records, children nested, siblings in key order.
    pub structure: Vec<NodeRecord>,

    /// Selection state by path.
    pub selection: BTreeMap<NodePath, Selection>,

    /// Annotated paths.
    pub annotated: BTreeSet<NodePath>,

    /// Display knobs at save time.
    #[serde(rename = "displaySettings")]
    pub display_settings: DisplaySettings,
}

/// One node of the saved shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRecord {
    pub key: String,
    pub expanded: bool,
    #[serde(default)]
    pub children: Vec<NodeRecord>,
}

impl Document {
    /// Parse and structurally check a JSON document.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let document: Self = serde_json::from_slice(bytes)
            .map_err(|e| PersistenceError::malformed(e.to_string()))?;
        document.nodes()?;
        Ok(document)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|source| PersistenceError::Serialization { source })
    }

    /// Every node of `structure` with its path and expanded flag, in
    /// document order.
    ///
    /// Fails on keys that could not have come from a code (empty, padded,
    /// containing the delimiter), on duplicate sibling keys and on nesting
    /// deeper than [`DepthBounds::CEILING`].
    pub fn nodes(&self) -> Result<Vec<(NodePath, bool)>> {
        let mut out = Vec::new();
        flatten(&self.structure, None, &mut out)?;
        Ok(out)
    }
}

fn flatten(
    records: &[NodeRecord],
    parent: Option<&NodePath>,
    out: &mut Vec<(NodePath, bool)>,
) -> Result<()> {
    let mut seen = BTreeSet::new();
    for record in records {
        let location = parent.map_or_else(|| "the root".to_string(), |p| format!("'{p}'"));
        if !is_valid_segment(&record.key) {
            return Err(PersistenceError::malformed(format!(
                "invalid key '{}' under {location}",
                record.key
            )));
        }
        if !seen.insert(record.key.as_str()) {
            return Err(PersistenceError::malformed(format!(
                "duplicate key '{}' under {location}",
                record.key
            )));
        }
        let path = match parent {
            Some(parent) => parent.child(record.key.as_str()),
            None => NodePath::from_segments([record.key.as_str()]),
        };
        if path.depth() > usize::from(DepthBounds::CEILING) {
            return Err(PersistenceError::malformed(format!(
                "'{path}' is nested deeper than {} levels",
                DepthBounds::CEILING
            )));
        }
        out.push((path.clone(), record.expanded));
        flatten(&record.children, Some(&path), out)?;
    }
    Ok(())
}
