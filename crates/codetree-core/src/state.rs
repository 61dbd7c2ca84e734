//! The engine instance.

use std::collections::BTreeMap;

use codetree_model::{DepthBounds, DisplaySettings, NodePath, Result, Selection, TreeError};
use tracing::{debug, info, warn};

use crate::annotation::AnnotationStore;
use crate::builder::build_tree;
use crate::config::EngineConfig;
use crate::parser::parse_cells;
use crate::selection::{self, SelectionMap};
use crate::tree::Tree;
use crate::view::{self, DepthSummary, NodeView};
use crate::visibility;

/// Result of replacing the tree with a new batch of codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Cells read from the collaborator.
    pub cells: usize,
    /// Codes that survived parsing, duplicates included.
    pub codes: usize,
    /// Lines dropped for having no segment.
    pub discarded: usize,
    /// Nodes in the new tree.
    pub nodes: usize,
    /// Codes longer than the depth limit, shortened to it.
    pub truncated: usize,
}

impl IngestSummary {
    /// `EmptyInput` when nothing survived parsing. Not fatal: the tree is
    /// simply empty.
    pub fn empty_input(&self) -> Option<TreeError> {
        (self.codes == 0).then_some(TreeError::EmptyInput)
    }
}

/// Result of overlaying persisted state onto the current tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlaySummary {
    /// Persisted paths that exist in the current tree.
    pub matched: usize,
    /// Persisted paths that do not, and were ignored.
    pub dropped: usize,
}

/// Tree plus everything attached to it: selection (on the nodes),
/// annotations and display settings.
///
/// Every operation runs to completion; an operation that returns an error has
/// changed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeState {
    tree: Tree,
    annotations: AnnotationStore,
    display: DisplaySettings,
    bounds: DepthBounds,
}

impl TreeState {
    /// Empty engine. Display settings outside the bounds are clamped.
    pub fn new(config: &EngineConfig) -> Self {
        let bounds = config.bounds;
        let requested = config.display_settings();
        let clamped = DisplaySettings {
            depth: bounds.clamp(usize::from(requested.depth)),
            collapse_threshold: bounds.clamp(usize::from(requested.collapse_threshold)),
        };
        if clamped != requested {
            warn!(?requested, ?clamped, "clamped display settings into bounds");
        }
        Self {
            tree: Tree::new(),
            annotations: AnnotationStore::new(),
            display: clamped,
            bounds,
        }
    }

    /// Restore a complete state from persisted parts.
    ///
    /// `tree` keeps its expanded flags. Selection is re-established from
    /// `selection` by path; annotations for paths missing from `tree` are
    /// dropped. A tree deeper than `bounds` allows is rejected.
    pub fn from_parts<I>(
        mut tree: Tree,
        selection: &SelectionMap,
        annotated: I,
        display: DisplaySettings,
        bounds: DepthBounds,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = NodePath>,
    {
        display.validate(&bounds)?;
        let height = tree.height();
        if height > usize::from(bounds.max()) {
            return Err(TreeError::DepthOutOfRange {
                value: height,
                min: bounds.min(),
                max: bounds.max(),
            });
        }
        let adjusted = selection::restore(&mut tree, selection);
        if adjusted > 0 {
            debug!(adjusted, "reconciled restored selection");
        }
        let annotations: AnnotationStore = annotated
            .into_iter()
            .filter(|path| tree.contains(path))
            .collect();
        Ok(Self {
            tree,
            annotations,
            display,
            bounds,
        })
    }

    /// Replace the tree with one built from `cells`.
    ///
    /// Selection and annotations are reset; the current display depth is
    /// projected onto the new tree. Without `max_depth` codes are cut at the
    /// deepest level the bounds allow.
    pub fn ingest<I, S>(&mut self, cells: I, max_depth: Option<usize>) -> Result<IngestSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let limit = match max_depth {
            Some(limit) => usize::from(self.bounds.check(limit)?),
            None => usize::from(self.bounds.max()),
        };
        let parsed = parse_cells(cells);
        let truncated = parsed
            .codes
            .iter()
            .filter(|code| code.depth() > limit)
            .count();
        if max_depth.is_none() && truncated > 0 {
            warn!(truncated, limit, "codes deeper than the depth limit were cut");
        }
        let mut tree = build_tree(&parsed.codes, Some(limit));
        visibility::project_depth(&mut tree, self.display.depth);

        let summary = IngestSummary {
            cells: parsed.cells,
            codes: parsed.codes.len(),
            discarded: parsed.discarded,
            nodes: tree.node_count(),
            truncated,
        };
        self.tree = tree;
        self.annotations.clear();

        if summary.empty_input().is_some() {
            warn!(cells = summary.cells, "no valid codes in input, tree is empty");
        } else {
            info!(
                codes = summary.codes,
                nodes = summary.nodes,
                discarded = summary.discarded,
                "built code tree"
            );
        }
        Ok(summary)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn display(&self) -> DisplaySettings {
        self.display
    }

    pub fn bounds(&self) -> DepthBounds {
        self.bounds
    }

    // === Selection ===

    /// Check or uncheck a node and its subtree.
    pub fn set_checked(&mut self, path: &NodePath, checked: bool) -> Result<()> {
        selection::set_checked(&mut self.tree, path, checked).map(|_| ())
    }

    /// Flip a node; returns the state it was set to.
    pub fn toggle(&mut self, path: &NodePath) -> Result<Selection> {
        selection::toggle(&mut self.tree, path)
    }

    /// Check everything, or uncheck everything if it is all checked already.
    pub fn toggle_all(&mut self) -> Selection {
        selection::toggle_all(&mut self.tree)
    }

    pub fn selection_snapshot(&self) -> SelectionMap {
        selection::selection_snapshot(&self.tree)
    }

    /// Checked leaves: the codes the user has picked, in pre-order.
    pub fn checked_leaves(&self) -> Vec<NodePath> {
        self.tree
            .iter()
            .filter(|node| node.is_leaf() && node.selection().is_checked())
            .map(|node| node.path().clone())
            .collect()
    }

    // === Annotations ===

    /// Flip the annotation of each path. Any unknown path fails the whole
    /// call before anything is flipped.
    pub fn toggle_annotations<I>(&mut self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = NodePath>,
    {
        let paths: Vec<NodePath> = paths.into_iter().collect();
        if let Some(missing) = paths.iter().find(|path| !self.tree.contains(path)) {
            return Err(TreeError::NodeNotFound {
                path: missing.clone(),
            });
        }
        debug!(count = paths.len(), "toggling annotations");
        self.annotations.toggle(paths);
        Ok(())
    }

    pub fn is_annotated(&self, path: &NodePath) -> bool {
        self.annotations.is_annotated(path)
    }

    // === Visibility ===

    /// Set the display depth and project it onto every node.
    pub fn set_display_depth(&mut self, depth: usize) -> Result<()> {
        let depth = self.bounds.check(depth)?;
        self.display.depth = depth;
        visibility::project_depth(&mut self.tree, depth);
        Ok(())
    }

    /// Set the depth from which expand-all and collapse-all apply.
    pub fn set_collapse_threshold(&mut self, threshold: usize) -> Result<()> {
        self.display.collapse_threshold = self.bounds.check(threshold)?;
        Ok(())
    }

    pub fn expand_all(&mut self) {
        visibility::expand_from(&mut self.tree, self.display.collapse_threshold);
    }

    pub fn collapse_all(&mut self) {
        visibility::collapse_from(&mut self.tree, self.display.collapse_threshold);
    }

    /// Open or close one node.
    pub fn set_expanded(&mut self, path: &NodePath, expanded: bool) -> Result<()> {
        self.tree.set_expanded(path, expanded)
    }

    // === Restoration ===

    /// Apply persisted per-path state to the current tree.
    ///
    /// The display depth is projected first, then `expanded` overrides the
    /// nodes it names. Paths absent from the tree are ignored; nodes absent
    /// from `selection` start unchecked. Invalid `display` changes nothing.
    pub fn overlay(
        &mut self,
        selection: &SelectionMap,
        annotated: &[NodePath],
        expanded: &BTreeMap<NodePath, bool>,
        display: DisplaySettings,
    ) -> Result<OverlaySummary> {
        display.validate(&self.bounds)?;
        self.display = display;
        visibility::project_depth(&mut self.tree, display.depth);
        for (path, &open) in expanded {
            if let Some(node) = self.tree.get_mut(path) {
                node.expanded = open;
            }
        }
        selection::restore(&mut self.tree, selection);
        self.annotations = annotated
            .iter()
            .filter(|path| self.tree.contains(path))
            .cloned()
            .collect();

        let mut summary = OverlaySummary::default();
        for path in selection.keys().chain(annotated) {
            if self.tree.contains(path) {
                summary.matched += 1;
            } else {
                summary.dropped += 1;
            }
        }
        info!(
            matched = summary.matched,
            dropped = summary.dropped,
            "applied saved state to tree"
        );
        Ok(summary)
    }

    // === Traversal ===

    /// Every node in pre-order.
    pub fn nodes(&self) -> Vec<NodeView<'_>> {
        view::all_nodes(&self.tree, &self.annotations)
    }

    /// Nodes a tree widget shows: pre-order, not descending into collapsed
    /// nodes.
    pub fn visible_nodes(&self) -> Vec<NodeView<'_>> {
        view::visible_nodes(&self.tree, &self.annotations)
    }

    pub fn depth_summary(&self) -> Vec<DepthSummary> {
        view::depth_summary(&self.tree, &self.annotations)
    }
}

impl Default for TreeState {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
