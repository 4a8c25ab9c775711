//! Structural mutations: node insertion and deletion.

use crate::error::MutationError;
use scribe_dom::{DomTree, NodeId, PositionReference};

/// Inserts a node into a container at a specific child index.
///
/// Inverse of [`NodeDeletion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInsertion {
    /// The node that was (or will be) inserted.
    pub inserted_node: NodeId,
    /// Where the node lands: container plus child index.
    pub position_reference: PositionReference,
}

impl NodeInsertion {
    /// Validate, insert `node` into `container` at `position`, and
    /// return the executed mutation.
    pub fn apply(
        tree: &mut DomTree,
        node: NodeId,
        container: NodeId,
        position: usize,
    ) -> Result<Self, MutationError> {
        let count = tree.child_count(container);
        if position > count {
            return Err(MutationError::InsertionOutOfBounds { position, count });
        }
        let mutation = Self::from_observed(node, container, position);
        mutation.execute(tree)?;
        Ok(mutation)
    }

    /// Reconstruct an insertion that already happened. No effect is
    /// performed and no validation runs.
    pub fn from_observed(inserted_node: NodeId, container: NodeId, position: usize) -> Self {
        Self {
            inserted_node,
            position_reference: PositionReference::new(container, position),
        }
    }

    pub fn execute(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        tree.insert_child(
            self.position_reference.container,
            self.position_reference.position,
            self.inserted_node,
        )?;
        Ok(())
    }

    pub fn undo(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        NodeDeletion::apply(tree, self.inserted_node)?;
        Ok(())
    }
}

/// Removes a single node from its parent, remembering where it was so
/// the removal can be undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDeletion {
    /// The node that was (or will be) removed.
    pub deleted_node: NodeId,
    /// The (parent, index) the node occupied before removal.
    pub position_reference: PositionReference,
}

impl NodeDeletion {
    /// Remove `node` from its parent and return the executed mutation.
    /// Errors when the node is not attached.
    pub fn apply(tree: &mut DomTree, node: NodeId) -> Result<Self, MutationError> {
        let position_reference = tree
            .position_of(node)
            .map_err(|_| MutationError::NoParent(node))?;
        let mutation = Self {
            deleted_node: node,
            position_reference,
        };
        mutation.execute(tree)?;
        Ok(mutation)
    }

    /// Reconstruct a removal that already happened, from the removed
    /// node's captured (parent, index).
    pub fn from_observed(deleted_node: NodeId, container: NodeId, position: usize) -> Self {
        Self {
            deleted_node,
            position_reference: PositionReference::new(container, position),
        }
    }

    pub fn execute(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        tree.detach(self.deleted_node)?;
        Ok(())
    }

    /// Re-insert the node at its captured prior position.
    pub fn undo(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        NodeInsertion::apply(
            tree,
            self.deleted_node,
            self.position_reference.container,
            self.position_reference.position,
        )?;
        Ok(())
    }
}
