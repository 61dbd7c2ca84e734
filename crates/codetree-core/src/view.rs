//! Read-only traversal for renderers.

use std::collections::BTreeMap;

use codetree_model::{NodePath, Selection};

use crate::annotation::AnnotationStore;
use crate::tree::{Node, Tree};

/// Everything a tree widget needs to draw one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView<'a> {
    pub key: &'a str,
    pub path: &'a NodePath,
    pub depth: usize,
    pub selection: Selection,
    pub annotated: bool,
    pub expanded: bool,
    pub child_count: usize,
}

impl NodeView<'_> {
    pub fn is_leaf(&self) -> bool {
        self.child_count == 0
    }
}

/// Node counts for one depth level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthSummary {
    pub depth: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub checked: usize,
    pub indeterminate: usize,
    pub annotated: usize,
}

pub(crate) fn view<'a>(node: &'a Node, annotations: &AnnotationStore) -> NodeView<'a> {
    NodeView {
        key: node.key(),
        path: node.path(),
        depth: node.depth(),
        selection: node.selection(),
        annotated: annotations.is_annotated(node.path()),
        expanded: node.is_expanded(),
        child_count: node.child_count(),
    }
}

pub(crate) fn all_nodes<'a>(tree: &'a Tree, annotations: &AnnotationStore) -> Vec<NodeView<'a>> {
    tree.iter().map(|node| view(node, annotations)).collect()
}

/// Pre-order walk that skips the subtrees of collapsed nodes.
pub(crate) fn visible_nodes<'a>(
    tree: &'a Tree,
    annotations: &AnnotationStore,
) -> Vec<NodeView<'a>> {
    let mut rows = Vec::new();
    let mut stack: Vec<&Node> = tree.roots().rev().collect();
    while let Some(node) = stack.pop() {
        rows.push(view(node, annotations));
        if node.is_expanded() {
            stack.extend(node.children().rev());
        }
    }
    rows
}

pub(crate) fn depth_summary(tree: &Tree, annotations: &AnnotationStore) -> Vec<DepthSummary> {
    let mut levels: BTreeMap<usize, DepthSummary> = BTreeMap::new();
    for node in tree.iter() {
        let entry = levels.entry(node.depth()).or_insert_with(|| DepthSummary {
            depth: node.depth(),
            ..DepthSummary::default()
        });
        entry.nodes += 1;
        if node.is_leaf() {
            entry.leaves += 1;
        }
        match node.selection() {
            Selection::Checked => entry.checked += 1,
            Selection::Indeterminate => entry.indeterminate += 1,
            Selection::Unchecked => {}
        }
        if annotations.is_annotated(node.path()) {
            entry.annotated += 1;
        }
    }
    levels.into_values().collect()
}
