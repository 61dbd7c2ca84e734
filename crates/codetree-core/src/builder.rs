//! Tree builder: folds segment sequences into a prefix tree.

use std::collections::BTreeMap;

use codetree_model::NodePath;
use tracing::debug;

use crate::tree::{Node, Tree};

/// Accumulates codes into a fresh tree.
///
/// With a maximum depth set, segments past it are discarded, so longer codes
/// that agree down to that depth land on the same node.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    max_depth: Option<usize>,
    roots: BTreeMap<String, Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Walk `segments` from the root set, creating missing nodes.
    ///
    /// Returns the number of nodes created; inserting a known code creates
    /// none.
    pub fn insert(&mut self, segments: &[String]) -> usize {
        let limit = self
            .max_depth
            .map_or(segments.len(), |max| segments.len().min(max));
        let segments = &segments[..limit];
        let Some((first, rest)) = segments.split_first() else {
            return 0;
        };

        let mut created = 0;
        let mut node = self.roots.entry(first.clone()).or_insert_with(|| {
            created += 1;
            Node::new(NodePath::from_segments([first.as_str()]))
        });
        for (index, segment) in rest.iter().enumerate() {
            node = node.children.entry(segment.clone()).or_insert_with(|| {
                created += 1;
                Node::new(NodePath::from_segments(segments[..index + 2].iter().cloned()))
            });
        }
        created
    }

    pub fn insert_path(&mut self, path: &NodePath) -> usize {
        self.insert(path.segments())
    }

    pub fn build(self) -> Tree {
        Tree { roots: self.roots }
    }
}

/// Build a tree from codes, optionally truncated to `max_depth` levels.
pub fn build_tree(codes: &[NodePath], max_depth: Option<usize>) -> Tree {
    let mut builder = TreeBuilder::new().with_max_depth(max_depth);
    let created: usize = codes.iter().map(|code| builder.insert_path(code)).sum();
    debug!(codes = codes.len(), nodes = created, ?max_depth, "built tree");
    builder.build()
}
