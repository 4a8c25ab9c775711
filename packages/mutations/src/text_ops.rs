//! Character-data mutations: insertion, deletion, merging, splitting.
//!
//! Merging and splitting are composites: their effects and inverses are
//! expressed through the primitive text/node mutations, so a merge undo
//! is a text deletion plus a node insertion and a split undo is a text
//! insertion plus a node deletion.

use crate::error::MutationError;
use crate::node_ops::{NodeDeletion, NodeInsertion};
use scribe_dom::{char_len, char_slice, DomTree, NodeId, PositionReference};
use serde::{Deserialize, Serialize};

/// Inserts a string into a text node at a char offset.
///
/// Inverse of [`TextDeletion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInsertion {
    pub inserted_text: String,
    /// Target text node plus the insertion offset.
    pub position_reference: PositionReference,
}

impl TextInsertion {
    pub fn apply(
        tree: &mut DomTree,
        text: &str,
        text_node: NodeId,
        insertion_offset: usize,
    ) -> Result<Self, MutationError> {
        if !tree.is_text(text_node) {
            return Err(MutationError::NotAText(text_node));
        }
        let len = tree.text_len(text_node)?;
        if insertion_offset > len {
            return Err(MutationError::OffsetOutOfBounds {
                offset: insertion_offset,
                len,
            });
        }
        let mutation = Self {
            inserted_text: text.to_string(),
            position_reference: PositionReference::new(text_node, insertion_offset),
        };
        mutation.execute(tree)?;
        Ok(mutation)
    }

    /// Reconstruct an insertion that already happened: the inserted text
    /// is the node's current `[start_offset, end_offset)` slice.
    pub fn from_observed(
        tree: &DomTree,
        text_node: NodeId,
        start_offset: usize,
        end_offset: usize,
    ) -> Result<Self, MutationError> {
        let inserted_text = char_slice(tree.text(text_node)?, start_offset, end_offset).to_string();
        Ok(Self {
            inserted_text,
            position_reference: PositionReference::new(text_node, start_offset),
        })
    }

    pub fn execute(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        tree.insert_text(
            self.position_reference.container,
            self.position_reference.position,
            &self.inserted_text,
        )?;
        Ok(())
    }

    /// Delete the same-length span starting at the insertion offset.
    pub fn undo(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        let start = self.position_reference.position;
        let end = start + char_len(&self.inserted_text);
        TextDeletion::apply(tree, self.position_reference.container, start, end)?;
        Ok(())
    }
}

/// Removes the char range `[start, end)` from a text node, capturing the
/// removed text for undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeletion {
    pub deleted_text: String,
    /// End of the removed range (exclusive).
    pub end_offset: usize,
    /// Target text node plus the start of the removed range.
    pub position_reference: PositionReference,
}

impl TextDeletion {
    pub fn apply(
        tree: &mut DomTree,
        text_node: NodeId,
        start_offset: usize,
        end_offset: usize,
    ) -> Result<Self, MutationError> {
        if !tree.is_text(text_node) {
            return Err(MutationError::NotAText(text_node));
        }
        let len = tree.text_len(text_node)?;
        if end_offset > len {
            return Err(MutationError::OffsetOutOfBounds {
                offset: end_offset,
                len,
            });
        }
        if start_offset > len {
            return Err(MutationError::OffsetOutOfBounds {
                offset: start_offset,
                len,
            });
        }
        let deleted_text = char_slice(tree.text(text_node)?, start_offset, end_offset).to_string();
        let mutation = Self {
            deleted_text,
            end_offset,
            position_reference: PositionReference::new(text_node, start_offset),
        };
        mutation.execute(tree)?;
        Ok(mutation)
    }

    /// Reconstruct a deletion that already happened from the removed
    /// string and its former start offset.
    pub fn from_observed(text_node: NodeId, start_offset: usize, deleted_text: String) -> Self {
        let end_offset = start_offset + char_len(&deleted_text);
        Self {
            deleted_text,
            end_offset,
            position_reference: PositionReference::new(text_node, start_offset),
        }
    }

    pub fn execute(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        tree.delete_text(
            self.position_reference.container,
            self.position_reference.position,
            self.end_offset,
        )?;
        Ok(())
    }

    /// Re-insert the removed text at the start offset.
    pub fn undo(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        TextInsertion::apply(
            tree,
            &self.deleted_text,
            self.position_reference.container,
            self.position_reference.position,
        )?;
        Ok(())
    }
}

/// Merges two adjacent text nodes right-to-left: the right node's data
/// is appended to the left node and the right node leaves the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMerging {
    /// The right-side node removed by the merge.
    pub removed_node: NodeId,
    /// The right node's data at construction time.
    pub appended_text: String,
    /// Left node plus the offset (its prior length) where the appended
    /// text lands.
    pub position_reference: PositionReference,
}

impl TextMerging {
    /// Append `from_node`'s data to `to_node` and remove `from_node`.
    pub fn apply(
        tree: &mut DomTree,
        to_node: NodeId,
        from_node: NodeId,
    ) -> Result<Self, MutationError> {
        if !tree.is_text(to_node) {
            return Err(MutationError::NotAText(to_node));
        }
        if !tree.is_text(from_node) {
            return Err(MutationError::NotAText(from_node));
        }
        let insertion_offset = tree.text_len(to_node)?;
        let mutation = Self::from_observed(tree, to_node, from_node, insertion_offset)?;
        mutation.execute(tree)?;
        Ok(mutation)
    }

    /// Reconstruct a merge that already happened. `position` is where in
    /// `to_node` the right node's content was inserted. The appended
    /// text is read from `from_node`, which may already be detached.
    pub fn from_observed(
        tree: &DomTree,
        to_node: NodeId,
        from_node: NodeId,
        position: usize,
    ) -> Result<Self, MutationError> {
        let appended_text = tree.text(from_node)?.to_string();
        Ok(Self {
            removed_node: from_node,
            appended_text,
            position_reference: PositionReference::new(to_node, position),
        })
    }

    pub fn execute(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        NodeDeletion::apply(tree, self.removed_node)?;
        TextInsertion::apply(
            tree,
            &self.appended_text,
            self.position_reference.container,
            self.position_reference.position,
        )?;
        Ok(())
    }

    /// Strip the appended span from the left node and put the right node
    /// back as its next sibling with its data intact.
    pub fn undo(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        let mut removed_node_placement = tree.position_of(self.position_reference.container)?;
        removed_node_placement.position += 1;
        let end_offset = self.position_reference.position + char_len(&self.appended_text);
        TextDeletion::apply(
            tree,
            self.position_reference.container,
            self.position_reference.position,
            end_offset,
        )?;
        NodeInsertion::apply(
            tree,
            self.removed_node,
            removed_node_placement.container,
            removed_node_placement.position,
        )?;
        Ok(())
    }
}

/// Which slice of the split node the newly created node receives, and on
/// which side of the original it is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    Before,
    After,
}

/// Splits one text node in two at a char offset.
///
/// With `Placement::Before` the new node takes `data[..offset]` and is
/// inserted as the previous sibling; with `Placement::After` it takes
/// `data[offset..]` and becomes the next sibling. The original node
/// keeps the remaining slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSplitting {
    pub placement: Placement,
    /// The original node plus the splitting offset.
    pub position_reference: PositionReference,
    new_node: Option<NodeId>,
}

impl TextSplitting {
    pub fn apply(
        tree: &mut DomTree,
        split_node: NodeId,
        splitting_offset: usize,
        placement: Placement,
    ) -> Result<Self, MutationError> {
        if !tree.is_text(split_node) {
            return Err(MutationError::NotAText(split_node));
        }
        let len = tree.text_len(split_node)?;
        if splitting_offset == 0 || splitting_offset >= len {
            return Err(MutationError::SplitOffsetOutOfBounds {
                offset: splitting_offset,
                len,
            });
        }
        let mut mutation = Self {
            placement,
            position_reference: PositionReference::new(split_node, splitting_offset),
            new_node: None,
        };
        mutation.execute(tree)?;
        Ok(mutation)
    }

    /// Reconstruct a split that already happened, naming the node the
    /// split produced.
    pub fn from_observed(
        original_node: NodeId,
        splitting_offset: usize,
        new_node: NodeId,
        placement: Placement,
    ) -> Self {
        Self {
            placement,
            position_reference: PositionReference::new(original_node, splitting_offset),
            new_node: Some(new_node),
        }
    }

    /// The node created by the split. Errors until `execute` has run on
    /// an `apply`-path instance.
    pub fn new_node(&self) -> Result<NodeId, MutationError> {
        self.new_node.ok_or(MutationError::NotExecuted)
    }

    pub fn execute(&mut self, tree: &mut DomTree) -> Result<(), MutationError> {
        let original = self.position_reference.container;
        let offset = self.position_reference.position;
        let original_text = tree.text(original)?.to_string();
        let len = char_len(&original_text);

        let piece = match self.placement {
            Placement::Before => char_slice(&original_text, 0, offset),
            Placement::After => char_slice(&original_text, offset, len),
        };
        let new_node = tree.create_text(piece);
        self.new_node = Some(new_node);

        let mut new_node_position = tree.position_of(original)?;
        if self.placement == Placement::After {
            new_node_position.position += 1;
        }
        NodeInsertion::apply(
            tree,
            new_node,
            new_node_position.container,
            new_node_position.position,
        )?;
        match self.placement {
            Placement::Before => TextDeletion::apply(tree, original, 0, offset)?,
            Placement::After => TextDeletion::apply(tree, original, offset, len)?,
        };
        Ok(())
    }

    /// Pour the split-off text back into the original node at the edge
    /// it came from, then drop the created node.
    pub fn undo(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        let new_node = self.new_node()?;
        let new_node_text = tree.text(new_node)?.to_string();
        let insertion_offset = match self.placement {
            Placement::Before => 0,
            Placement::After => self.position_reference.position,
        };
        TextInsertion::apply(
            tree,
            &new_node_text,
            self.position_reference.container,
            insertion_offset,
        )?;
        NodeDeletion::apply(tree, new_node)?;
        Ok(())
    }
}
