//! # Content-Node Classification
//!
//! The editing core never decides by itself which nodes carry
//! user-visible content - that is the host's node-type registry. The
//! host implements [`ContentClassifier::is_content_node`]; the
//! document-order traversals built on top of it are provided here and
//! can be overridden when the host has a faster index.
//!
//! Traversals never ascend past an element carrying a non-empty
//! `contenteditable` attribute: that element is the editable root, and
//! nodes above it are not part of the observed region.

use crate::error::DomError;
use crate::tree::{DomTree, NodeId};
use serde::{Deserialize, Serialize};

/// Sibling-walk direction in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

pub trait ContentClassifier {
    /// Does this node carry user-visible content (as opposed to being
    /// purely structural or formatting)?
    fn is_content_node(&self, tree: &DomTree, node: NodeId) -> bool;

    /// All content nodes strictly under `root`, in document order.
    fn content_nodes(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        tree.subtree(root)
            .into_iter()
            .skip(1)
            .filter(|&n| self.is_content_node(tree, n))
            .collect()
    }

    /// Like [`content_nodes`](Self::content_nodes), but guarantees a
    /// non-empty result by appending an empty text node to `root` when
    /// the subtree has no content at all.
    fn content_nodes_or_fill(
        &self,
        tree: &mut DomTree,
        root: NodeId,
    ) -> Result<Vec<NodeId>, DomError> {
        let found = self.content_nodes(tree, root);
        if !found.is_empty() {
            return Ok(found);
        }
        let filler = tree.create_text("");
        tree.append_child(root, filler)?;
        Ok(vec![filler])
    }

    /// The nearest content node reachable from `node` walking in
    /// `direction`, climbing to ancestors when siblings run out.
    ///
    /// With `include_self`, the starting node itself (or its first
    /// descendant) is considered before any sibling.
    fn adjacent_content_node(
        &self,
        tree: &DomTree,
        node: NodeId,
        direction: Direction,
        include_self: bool,
    ) -> Option<NodeId> {
        if include_self {
            if self.is_content_node(tree, node) {
                return Some(node);
            }
            if let Some(first) = tree.first_child(node) {
                return self.adjacent_content_node(tree, first, direction, true);
            }
        }

        let mut current = node;
        loop {
            current = next_traversal_node(tree, current, direction)?;
            if self.is_content_node(tree, current) {
                return Some(current);
            }
            if let Some(found) = self.child_content_node(tree, current, direction) {
                return Some(found);
            }
        }
    }

    /// The first content node among `node`'s descendants, scanning
    /// children in `direction`.
    fn child_content_node(
        &self,
        tree: &DomTree,
        node: NodeId,
        direction: Direction,
    ) -> Option<NodeId> {
        let mut children: Vec<NodeId> = tree.children(node).to_vec();
        if direction == Direction::Backward {
            children.reverse();
        }
        for child in children {
            if self.is_content_node(tree, child) {
                return Some(child);
            }
            if let Some(found) = self.child_content_node(tree, child, direction) {
                return Some(found);
            }
        }
        None
    }

    fn first_content_node_of(&self, tree: &DomTree, node: NodeId) -> Option<NodeId> {
        self.adjacent_content_node(tree, node, Direction::Forward, true)
    }

    fn last_content_node_of(&self, tree: &DomTree, node: NodeId) -> Option<NodeId> {
        if self.is_content_node(tree, node) {
            return Some(node);
        }
        self.content_nodes(tree, node).last().copied()
    }
}

/// The next node in `direction`: the nearest sibling, climbing through
/// ancestors when none - stopping at the editable root.
fn next_traversal_node(tree: &DomTree, node: NodeId, direction: Direction) -> Option<NodeId> {
    let mut current = node;
    loop {
        if tree
            .attribute(current, "contenteditable")
            .is_some_and(|v| !v.is_empty())
        {
            return None;
        }
        let sibling = match direction {
            Direction::Forward => tree.next_sibling(current),
            Direction::Backward => tree.previous_sibling(current),
        };
        if let Some(found) = sibling {
            return Some(found);
        }
        current = tree.parent(current)?;
    }
}
