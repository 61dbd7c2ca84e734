//! Highlight annotations, keyed by path.

use std::collections::BTreeSet;

use codetree_model::NodePath;

/// Set of annotated paths.
///
/// Independent of selection: neither ever changes the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationStore {
    paths: BTreeSet<NodePath>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip each distinct path on its own current state.
    pub fn toggle<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = NodePath>,
    {
        let distinct: BTreeSet<NodePath> = paths.into_iter().collect();
        for path in distinct {
            if !self.paths.remove(&path) {
                self.paths.insert(path);
            }
        }
    }

    pub fn is_annotated(&self, path: &NodePath) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Annotated paths in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &NodePath> {
        self.paths.iter()
    }
}

impl FromIterator<NodePath> for AnnotationStore {
    fn from_iter<I: IntoIterator<Item = NodePath>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(code: &str) -> NodePath {
        code.parse().unwrap()
    }

    #[test]
    fn test_toggle_is_per_path() {
        let mut store = AnnotationStore::new();
        store.toggle([path("A")]);
        store.toggle([path("A"), path("B")]);
        assert!(!store.is_annotated(&path("A")));
        assert!(store.is_annotated(&path("B")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicates_in_one_call_toggle_once() {
        let mut store = AnnotationStore::new();
        store.toggle([path("A"), path("A")]);
        assert!(store.is_annotated(&path("A")));
    }
}
