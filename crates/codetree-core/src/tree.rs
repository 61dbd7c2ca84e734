//! Prefix tree of code segments.

use std::collections::BTreeMap;

use codetree_model::{NodePath, Result, Selection, TreeError};

/// One segment at one position in the tree.
///
/// Children are keyed by segment and iterate in lexicographic key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    path: NodePath,
    pub(crate) selection: Selection,
    pub(crate) expanded: bool,
    pub(crate) children: BTreeMap<String, Node>,
}

impl Node {
    pub(crate) fn new(path: NodePath) -> Self {
        Self {
            path,
            selection: Selection::Unchecked,
            expanded: false,
            children: BTreeMap::new(),
        }
    }

    /// Segment at this position.
    pub fn key(&self) -> &str {
        self.path.key()
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// 1-based distance from the root set.
    pub fn depth(&self) -> usize {
        self.path.depth()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children.get(key)
    }

    /// Children in key order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.children.values()
    }

    /// Visit this node and every descendant, parents first.
    pub(crate) fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Node),
    {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            f(&mut *node);
            stack.extend(node.children.values_mut());
        }
    }
}

/// Forest of root segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub(crate) roots: BTreeMap<String, Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Root nodes in key order.
    pub fn roots(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.roots.values()
    }

    pub fn root(&self, key: &str) -> Option<&Node> {
        self.roots.get(key)
    }

    pub fn get(&self, path: &NodePath) -> Option<&Node> {
        let (first, rest) = path.segments().split_first()?;
        let mut node = self.roots.get(first)?;
        for segment in rest {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    pub(crate) fn get_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let (first, rest) = path.segments().split_first()?;
        let mut node = self.roots.get_mut(first)?;
        for segment in rest {
            node = node.children.get_mut(segment)?;
        }
        Some(node)
    }

    pub fn contains(&self, path: &NodePath) -> bool {
        self.get(path).is_some()
    }

    /// Look up a node or report it missing.
    pub fn require(&self, path: &NodePath) -> Result<&Node> {
        self.get(path).ok_or_else(|| TreeError::NodeNotFound { path: path.clone() })
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Depth of the deepest node, 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Pre-order walk with siblings in key order.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder {
            stack: self.roots.values().rev().collect(),
        }
    }

    /// Open or close a single node.
    pub fn set_expanded(&mut self, path: &NodePath, expanded: bool) -> Result<()> {
        let node = self
            .get_mut(path)
            .ok_or_else(|| TreeError::NodeNotFound { path: path.clone() })?;
        node.expanded = expanded;
        Ok(())
    }

    pub(crate) fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Node),
    {
        let mut stack: Vec<&mut Node> = self.roots.values_mut().collect();
        while let Some(node) = stack.pop() {
            f(&mut *node);
            stack.extend(node.children.values_mut());
        }
    }
}

/// Iterator returned by [`Tree::iter`].
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.values().rev());
        Some(node)
    }
}
