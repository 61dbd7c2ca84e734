//! Visibility projection.
//!
//! Two independent ways of writing the `expanded` flag; whichever ran last
//! is what the display shows.

use tracing::debug;

use crate::tree::Tree;

/// Open every node shallower than `depth`, close the rest.
pub(crate) fn project_depth(tree: &mut Tree, depth: u8) {
    let depth = usize::from(depth);
    tree.for_each_mut(|node| node.expanded = node.depth() < depth);
    debug!(depth, "projected display depth");
}

/// Open every node at or below `threshold`.
pub(crate) fn expand_from(tree: &mut Tree, threshold: u8) {
    set_from(tree, threshold, true);
}

/// Close every node at or below `threshold`.
pub(crate) fn collapse_from(tree: &mut Tree, threshold: u8) {
    set_from(tree, threshold, false);
}

fn set_from(tree: &mut Tree, threshold: u8, expanded: bool) {
    let threshold = usize::from(threshold);
    tree.for_each_mut(|node| {
        if node.depth() >= threshold {
            node.expanded = expanded;
        }
    });
    debug!(threshold, expanded, "applied bulk expansion");
}
