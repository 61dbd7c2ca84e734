//! Tri-state selection propagation.
//!
//! Setting a node cascades the state down to every descendant; ancestors are
//! then recomputed from their direct children on the way back up, stopping at
//! the first ancestor whose state does not change.

use std::collections::BTreeMap;

use codetree_model::{NodePath, Result, Selection, TreeError};
use tracing::debug;

use crate::tree::{Node, Tree};

/// Per-path selection, as persisted.
pub type SelectionMap = BTreeMap<NodePath, Selection>;

/// Check or uncheck `path` and its whole subtree.
///
/// Returns whether anything changed. An unknown path is reported and leaves
/// the tree untouched.
pub(crate) fn set_checked(tree: &mut Tree, path: &NodePath, checked: bool) -> Result<bool> {
    let target = Selection::from_checked(checked);
    let changed = apply(&mut tree.roots, path.segments(), target)
        .ok_or_else(|| TreeError::NodeNotFound { path: path.clone() })?;
    debug!(%path, state = target.label(), changed, "set selection");
    Ok(changed)
}

/// Flip a node: checked becomes unchecked, anything else becomes checked.
pub(crate) fn toggle(tree: &mut Tree, path: &NodePath) -> Result<Selection> {
    let current = tree.require(path)?.selection;
    let target = if current.is_checked() {
        Selection::Unchecked
    } else {
        Selection::Checked
    };
    set_checked(tree, path, target.is_checked())?;
    Ok(target)
}

/// Uncheck everything if every root is checked, otherwise check everything.
pub(crate) fn toggle_all(tree: &mut Tree) -> Selection {
    let all_checked = tree.roots.values().all(|root| root.selection.is_checked());
    let target = if all_checked {
        Selection::Unchecked
    } else {
        Selection::Checked
    };
    for root in tree.roots.values_mut() {
        cascade(root, target);
    }
    debug!(state = target.label(), "toggled all");
    target
}

/// Descend along `segments`, set the target, recompute on the way back.
///
/// `None` means the path does not exist; nothing has been written in that
/// case because writes only happen after the recursive call returns.
fn apply(
    siblings: &mut BTreeMap<String, Node>,
    segments: &[String],
    target: Selection,
) -> Option<bool> {
    let (first, rest) = segments.split_first()?;
    let node = siblings.get_mut(first)?;

    if rest.is_empty() {
        if node.selection == target {
            return Some(false);
        }
        cascade(node, target);
        return Some(true);
    }

    if !apply(&mut node.children, rest, target)? {
        return Some(false);
    }
    let derived = Selection::from_children(node.children.values().map(|c| c.selection));
    if derived == node.selection {
        return Some(false);
    }
    node.selection = derived;
    Some(true)
}

fn cascade(node: &mut Node, target: Selection) {
    node.for_each_mut(|n: &mut Node| n.selection = target);
}

/// Apply persisted states and re-establish the invariant once.
///
/// Paths missing from `states` start unchecked. Leaves cannot be
/// indeterminate, and internal nodes take the state their children imply.
/// Returns how many nodes ended up differing from `states`.
pub(crate) fn restore(tree: &mut Tree, states: &SelectionMap) -> usize {
    tree.roots
        .values_mut()
        .map(|root| restore_node(root, states))
        .sum()
}

fn restore_node(node: &mut Node, states: &SelectionMap) -> usize {
    let stored = states.get(node.path()).copied().unwrap_or_default();
    let mut adjusted: usize = node
        .children
        .values_mut()
        .map(|child| restore_node(child, states))
        .sum();

    node.selection = if node.children.is_empty() {
        match stored {
            Selection::Indeterminate => Selection::Unchecked,
            other => other,
        }
    } else {
        Selection::from_children(node.children.values().map(|c| c.selection))
    };
    if node.selection != stored {
        adjusted += 1;
    }
    adjusted
}

/// Every path's current state, in pre-order.
pub fn selection_snapshot(tree: &Tree) -> SelectionMap {
    tree.iter()
        .map(|node| (node.path().clone(), node.selection))
        .collect()
}

/// Nodes whose state disagrees with their children. Empty for any tree
/// produced by the engine.
pub fn inconsistent_nodes(tree: &Tree) -> Vec<NodePath> {
    tree.iter()
        .filter(|node| {
            let expected = Selection::from_children(node.children().map(Node::selection));
            if node.is_leaf() {
                node.selection == Selection::Indeterminate
            } else {
                node.selection != expected
            }
        })
        .map(|node| node.path().clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_tree;
    use crate::parser::parse_cells;

    fn tree(codes: &[&str]) -> Tree {
        build_tree(&parse_cells(codes).codes, None)
    }

    fn path(code: &str) -> NodePath {
        code.parse().unwrap()
    }

    fn state(tree: &Tree, code: &str) -> Selection {
        tree.get(&path(code)).unwrap().selection()
    }

    #[test]
    fn test_checking_leaves_propagates_up() {
        let mut tree = tree(&["A-01-X", "A-01-Y", "A-02-X"]);
        set_checked(&mut tree, &path("A-01-X"), true).unwrap();
        assert_eq!(state(&tree, "A-01"), Selection::Indeterminate);
        assert_eq!(state(&tree, "A"), Selection::Indeterminate);

        set_checked(&mut tree, &path("A-01-Y"), true).unwrap();
        assert_eq!(state(&tree, "A-01"), Selection::Checked);
        assert_eq!(state(&tree, "A"), Selection::Indeterminate);
        assert_eq!(state(&tree, "A-02"), Selection::Unchecked);
        assert!(inconsistent_nodes(&tree).is_empty());
    }

    #[test]
    fn test_cascade_down() {
        let mut tree = tree(&["A-01-X", "A-01-Y", "A-02-X"]);
        set_checked(&mut tree, &path("A"), true).unwrap();
        assert!(tree.iter().all(|n| n.selection().is_checked()));

        set_checked(&mut tree, &path("A-02"), false).unwrap();
        assert_eq!(state(&tree, "A-02-X"), Selection::Unchecked);
        assert_eq!(state(&tree, "A"), Selection::Indeterminate);
        assert_eq!(state(&tree, "A-01"), Selection::Checked);
    }

    #[test]
    fn test_unchanged_target_reports_no_change() {
        let mut tree = tree(&["A-01"]);
        assert!(!set_checked(&mut tree, &path("A-01"), false).unwrap());
        assert!(set_checked(&mut tree, &path("A-01"), true).unwrap());
        assert_eq!(state(&tree, "A"), Selection::Checked);
    }

    #[test]
    fn test_unknown_path_is_noop() {
        let mut tree = tree(&["A-01"]);
        let before = tree.clone();
        let err = set_checked(&mut tree, &path("A-01-Z"), true).unwrap_err();
        assert_eq!(err, TreeError::NodeNotFound { path: path("A-01-Z") });
        assert_eq!(tree, before);
    }

    #[test]
    fn test_toggle_indeterminate_checks() {
        let mut tree = tree(&["A-1", "A-2"]);
        set_checked(&mut tree, &path("A-1"), true).unwrap();
        assert_eq!(toggle(&mut tree, &path("A")).unwrap(), Selection::Checked);
        assert_eq!(state(&tree, "A-2"), Selection::Checked);
        assert_eq!(toggle(&mut tree, &path("A")).unwrap(), Selection::Unchecked);
        assert_eq!(state(&tree, "A-1"), Selection::Unchecked);
    }

    #[test]
    fn test_toggle_all_alternates() {
        let mut tree = tree(&["A-1", "B-1"]);
        set_checked(&mut tree, &path("A-1"), true).unwrap();
        assert_eq!(toggle_all(&mut tree), Selection::Checked);
        assert!(tree.iter().all(|n| n.selection().is_checked()));
        assert_eq!(toggle_all(&mut tree), Selection::Unchecked);
        assert!(tree.iter().all(|n| n.selection() == Selection::Unchecked));
    }

    #[test]
    fn test_restore_reconciles() {
        let mut tree = tree(&["A-1", "A-2", "B"]);
        let mut states = SelectionMap::new();
        states.insert(path("A"), Selection::Checked);
        states.insert(path("A-1"), Selection::Checked);
        states.insert(path("B"), Selection::Indeterminate);
        states.insert(path("Z"), Selection::Checked);

        let adjusted = restore(&mut tree, &states);
        assert_eq!(state(&tree, "A"), Selection::Indeterminate);
        assert_eq!(state(&tree, "B"), Selection::Unchecked);
        assert_eq!(adjusted, 2);
        assert!(inconsistent_nodes(&tree).is_empty());
    }
}
