//! Conversion between the engine state and [`Document`].

use std::collections::BTreeMap;

use codetree_core::{Node, OverlaySummary, TreeBuilder, TreeState};
use codetree_model::{DepthBounds, NodePath};
use tracing::debug;

use crate::document::{Document, NodeRecord};
use crate::error::{PersistenceError, Result};

impl Document {
    /// Snapshot the whole state.
    pub fn capture(state: &TreeState) -> Self {
        Self {
            structure: state.tree().roots().map(record).collect(),
            selection: state.selection_snapshot(),
            annotated: state.annotations().iter().cloned().collect(),
            display_settings: state.display(),
        }
    }

    /// Rebuild a state from this document alone.
    ///
    /// Selection and annotation entries for paths not in `structure` are
    /// ignored. A structure deeper than `bounds` allows is rejected.
    pub fn restore(&self, bounds: DepthBounds) -> Result<TreeState> {
        let nodes = self.nodes()?;
        if let Some((path, _)) = nodes
            .iter()
            .find(|(path, _)| path.depth() > usize::from(bounds.max()))
        {
            return Err(PersistenceError::malformed(format!(
                "'{path}' is deeper than the depth limit {}",
                bounds.max()
            )));
        }
        let mut builder = TreeBuilder::new();
        for (path, _) in &nodes {
            builder.insert_path(path);
        }
        let mut tree = builder.build();
        for (path, expanded) in &nodes {
            tree.set_expanded(path, *expanded)
                .map_err(|e| PersistenceError::malformed(e.to_string()))?;
        }

        let state = TreeState::from_parts(
            tree,
            &self.selection,
            self.annotated.iter().cloned(),
            self.display_settings,
            bounds,
        )
        .map_err(|e| PersistenceError::malformed(format!("displaySettings: {e}")))?;
        debug!(nodes = nodes.len(), "restored tree from document");
        Ok(state)
    }

    /// Lay this document's per-path state over the tree already in `state`.
    ///
    /// Used when the tree was rebuilt from a new batch of codes. The document
    /// is checked in full before `state` is touched.
    pub fn apply_to(&self, state: &mut TreeState) -> Result<OverlaySummary> {
        let expanded: BTreeMap<NodePath, bool> = self.nodes()?.into_iter().collect();
        let annotated: Vec<NodePath> = self.annotated.iter().cloned().collect();
        state
            .overlay(&self.selection, &annotated, &expanded, self.display_settings)
            .map_err(|e| PersistenceError::malformed(format!("displaySettings: {e}")))
    }
}

fn record(node: &Node) -> NodeRecord {
    NodeRecord {
        key: node.key().to_string(),
        expanded: node.is_expanded(),
        children: node.children().map(record).collect(),
    }
}
