//! # Position Index
//!
//! The engine's shadow record of where every observed node sits: a map
//! from node to (parent, child index), maintained independently of the
//! live tree. It exists because a removed node has already lost its
//! live-tree context (or been reattached elsewhere) by the time the
//! engine classifies the removal - the index is the sole oracle for
//! "where was this node".
//!
//! The index is only mutated inside a classification pass, so it is
//! never read in a torn state.

use crate::error::RecognizerError;
use scribe_dom::{DomTree, NodeId};
use std::collections::HashMap;

/// One index entry: the node's parent and its child index there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedPosition {
    pub parent: NodeId,
    pub position: usize,
}

#[derive(Debug, Default)]
pub struct PositionIndex {
    entries: HashMap<NodeId, IndexedPosition>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every node under `root` (the root itself has no entry).
    pub fn seed(&mut self, tree: &DomTree, root: NodeId) {
        for node in tree.subtree(root) {
            for (position, &child) in tree.children(node).iter().enumerate() {
                self.entries.insert(
                    child,
                    IndexedPosition {
                        parent: node,
                        position,
                    },
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_tracked(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    /// Where the node sits. A miss is an invariant violation: the index
    /// was not kept in sync.
    pub fn get(&self, node: NodeId) -> Result<IndexedPosition, RecognizerError> {
        self.entries
            .get(&node)
            .copied()
            .ok_or(RecognizerError::UntrackedNode(node))
    }

    /// Record an observed insertion of `node` (and its subtree) under
    /// `parent`, after `previous_sibling` (or at index 0 when there is
    /// none). Same-parent entries at or past the landing index shift up.
    pub fn record_insertion(
        &mut self,
        tree: &DomTree,
        node: NodeId,
        parent: NodeId,
        previous_sibling: Option<NodeId>,
    ) -> Result<IndexedPosition, RecognizerError> {
        let position = match previous_sibling {
            Some(sibling) => self.get(sibling)?.position + 1,
            None => 0,
        };
        for entry in self.entries.values_mut() {
            if entry.parent == parent && entry.position >= position {
                entry.position += 1;
            }
        }
        let entry = IndexedPosition { parent, position };
        self.entries.insert(node, entry);

        // an inserted subtree arrives as one record; index its inner
        // nodes from their live positions
        for inner in tree.subtree(node) {
            for (child_position, &child) in tree.children(inner).iter().enumerate() {
                self.entries.insert(
                    child,
                    IndexedPosition {
                        parent: inner,
                        position: child_position,
                    },
                );
            }
        }
        Ok(entry)
    }

    /// Record an observed removal: evict the node and its whole subtree,
    /// shift same-parent entries past it down, and return where the node
    /// used to be.
    pub fn record_removal(
        &mut self,
        tree: &DomTree,
        node: NodeId,
    ) -> Result<IndexedPosition, RecognizerError> {
        let removed = self.get(node)?;
        for evicted in tree.subtree(node) {
            self.entries.remove(&evicted);
        }
        for entry in self.entries.values_mut() {
            if entry.parent == removed.parent && entry.position > removed.position {
                entry.position -= 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (DomTree, PositionIndex, Vec<NodeId>) {
        let mut tree = DomTree::new();
        let root = tree.root();
        let a = tree.create_text("a");
        let b = tree.create_element("strong");
        let inner = tree.create_text("inner");
        let c = tree.create_text("c");
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();
        tree.append_child(b, inner).unwrap();
        tree.append_child(root, c).unwrap();

        let mut index = PositionIndex::new();
        index.seed(&tree, root);
        (tree, index, vec![a, b, inner, c])
    }

    #[test]
    fn seed_indexes_the_whole_subtree() {
        let (tree, index, nodes) = seeded();
        assert_eq!(index.len(), 4);
        let inner = index.get(nodes[2]).unwrap();
        assert_eq!(inner.parent, nodes[1]);
        assert_eq!(inner.position, 0);
        let c = index.get(nodes[3]).unwrap();
        assert_eq!(c.parent, tree.root(), "c is a root child");
        assert_eq!(c.position, 2);
    }

    #[test]
    fn insertion_shifts_following_siblings_up() {
        let (mut tree, mut index, nodes) = seeded();
        let root = tree.root();
        let new = tree.create_text("new");
        tree.insert_child(root, 1, new).unwrap();

        let entry = index
            .record_insertion(&tree, new, root, Some(nodes[0]))
            .unwrap();
        assert_eq!(entry.position, 1);
        assert_eq!(index.get(nodes[1]).unwrap().position, 2);
        assert_eq!(index.get(nodes[3]).unwrap().position, 3);
        // nested node untouched
        assert_eq!(index.get(nodes[2]).unwrap().position, 0);
    }

    #[test]
    fn insertion_without_previous_sibling_lands_first() {
        let (mut tree, mut index, nodes) = seeded();
        let root = tree.root();
        let new = tree.create_text("new");
        tree.insert_child(root, 0, new).unwrap();

        let entry = index.record_insertion(&tree, new, root, None).unwrap();
        assert_eq!(entry.position, 0);
        assert_eq!(index.get(nodes[0]).unwrap().position, 1);
    }

    #[test]
    fn removal_evicts_subtree_and_shifts_down() {
        let (mut tree, mut index, nodes) = seeded();
        let strong = nodes[1];
        tree.detach(strong).unwrap();

        let removed = index.record_removal(&tree, strong).unwrap();
        assert_eq!(removed.position, 1);
        assert!(!index.is_tracked(strong));
        assert!(!index.is_tracked(nodes[2]), "inner node evicted too");
        assert_eq!(index.get(nodes[3]).unwrap().position, 1);
    }

    #[test]
    fn lookup_miss_is_an_error() {
        let (mut tree, index, _) = seeded();
        let unknown = tree.create_text("x");
        assert!(matches!(
            index.get(unknown),
            Err(RecognizerError::UntrackedNode(n)) if n == unknown
        ));
    }
}
