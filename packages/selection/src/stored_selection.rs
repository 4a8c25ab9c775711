//! A stored selection: boundary pair, insertion point, covered content.

use crate::error::SelectionError;
use crate::selected_element::{RelativePosition, SelectedElement};
use scribe_dom::{ContentClassifier, DomTree, NodeId, PositionReference};

/// The char range of one text node participating in a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOffsets {
    pub start: usize,
    pub end: usize,
}

/// A selection captured as structured state: the two boundary points,
/// whether it is collapsed, plus two values computed at construction:
/// the insertion point (where a node inserted at the caret would land)
/// and the ordered content nodes the range covers.
///
/// The computed values go stale as the tree changes; the `decrease_*`
/// mutators exist for the one sanctioned in-place adjustment (an
/// external deletion shifting char positions left).
#[derive(Debug, Clone)]
pub struct StoredSelection {
    pub editable_root: NodeId,
    pub start: SelectedElement,
    pub end: SelectedElement,
    pub collapsed: bool,
    insertion_point: PositionReference,
    selected_nodes: Vec<NodeId>,
}

impl StoredSelection {
    pub fn new(
        tree: &DomTree,
        nodes: &impl ContentClassifier,
        editable_root: NodeId,
        start: SelectedElement,
        end: SelectedElement,
        collapsed: bool,
    ) -> Result<Self, SelectionError> {
        let insertion_point = compute_insertion_point(tree, &start)?;
        let selected_nodes = compute_selected_content(tree, nodes, &start, &end)?;
        Ok(Self {
            editable_root,
            start,
            end,
            collapsed,
            insertion_point,
            selected_nodes,
        })
    }

    /// Where a node inserted at the caret would land.
    pub fn insertion_point(&self) -> PositionReference {
        self.insertion_point
    }

    /// Content nodes fully or partially covered by the range, in
    /// document order.
    pub fn selected_nodes(&self) -> &[NodeId] {
        &self.selected_nodes
    }

    /// The selection sits at the very start of the editable content.
    pub fn is_at_start(&self, tree: &DomTree, nodes: &impl ContentClassifier) -> bool {
        self.start.is_first_element(tree, nodes) && self.start.is_caret_at_start(tree)
    }

    /// The selection sits at the very end of the editable content.
    pub fn is_at_end(&self, tree: &DomTree, nodes: &impl ContentClassifier) -> bool {
        self.end.is_last_element(tree, nodes) && self.end.is_caret_at_end(tree)
    }

    /// Both boundaries lie in the same text node.
    pub fn is_text_node_range(&self, tree: &DomTree) -> bool {
        self.start.node == self.end.node && tree.is_text(self.start.node)
    }

    /// The selected text of a single-text-node range.
    pub fn selected_text(&self, tree: &DomTree) -> Result<String, SelectionError> {
        if !self.is_text_node_range(tree) {
            return Err(SelectionError::NotATextRange);
        }
        let data = tree.text(self.start.node)?;
        Ok(scribe_dom::char_slice(data, self.start.offset, self.end.offset).to_string())
    }

    /// The `[start, end)` char range of `node` that participates in the
    /// selection: the exact sub-range for a single-text-node range, edge
    /// ranges for the boundary nodes, the full text for interior nodes.
    pub fn find_text_node_offsets(
        &self,
        tree: &DomTree,
        node: NodeId,
    ) -> Result<TextOffsets, SelectionError> {
        let full_len = tree.text_len(node).unwrap_or(0);
        if self.is_text_node_range(tree) && self.start.node == node {
            Ok(TextOffsets {
                start: self.start.offset,
                end: self.end.offset,
            })
        } else if node == self.start.node {
            Ok(TextOffsets {
                start: self.start.offset,
                end: full_len,
            })
        } else if node == self.end.node {
            Ok(TextOffsets {
                start: 0,
                end: self.end.offset,
            })
        } else if self.is_node_selected(node) {
            Ok(TextOffsets {
                start: 0,
                end: full_len,
            })
        } else {
            Err(SelectionError::NotSelected(node))
        }
    }

    pub fn is_node_selected(&self, node: NodeId) -> bool {
        self.selected_nodes.contains(&node)
    }

    /// Whether an entire text node is covered. A boundary node counts
    /// only when its own boundary predicate holds (and, for a
    /// single-text-node range, both must hold).
    pub fn is_text_fully_selected(&self, tree: &DomTree, node: NodeId) -> bool {
        let text_range = self.is_text_node_range(tree);

        if node == self.start.node && self.start.is_text_node(tree) {
            return self.start.is_caret_at_start(tree)
                && (!text_range || self.end.is_caret_at_end(tree));
        }
        if node == self.end.node && self.end.is_text_node(tree) {
            return self.end.is_caret_at_end(tree)
                && (!text_range || self.start.is_caret_at_start(tree));
        }
        self.selected_nodes.contains(&node)
    }

    /// Shift both boundary offsets left after an external deletion,
    /// saturating at zero.
    pub fn decrease_offsets_by(&mut self, amount: usize) {
        self.start.offset = self.start.offset.saturating_sub(amount);
        self.end.offset = self.end.offset.saturating_sub(amount);
    }

    /// Shift the insertion point left. Errors when the position would go
    /// negative; the caller must recompute instead.
    pub fn decrease_insertion_position_by(&mut self, amount: usize) -> Result<(), SelectionError> {
        self.insertion_point.position = self
            .insertion_point
            .position
            .checked_sub(amount)
            .ok_or(SelectionError::InsertionPositionUnderflow)?;
        Ok(())
    }
}

fn compute_insertion_point(
    tree: &DomTree,
    start: &SelectedElement,
) -> Result<PositionReference, SelectionError> {
    let mut insertion_point = tree.position_of(start.node)?;

    let past_start_of_text = start.is_text_node(tree) && !start.is_caret_at_start(tree);
    let after_unit = !start.is_text_node(tree) && start.position == RelativePosition::After;
    if past_start_of_text || after_unit {
        insertion_point.position += 1;
    }
    Ok(insertion_point)
}

fn compute_selected_content(
    tree: &DomTree,
    nodes: &impl ContentClassifier,
    start: &SelectedElement,
    end: &SelectedElement,
) -> Result<Vec<NodeId>, SelectionError> {
    let common_ancestor = find_common_ancestor(tree, start.node, end.node)?;
    let parent_content_nodes = nodes.content_nodes(tree, common_ancestor);

    let is_empty_text_node =
        |element: &SelectedElement| tree.text(element.node).map_or(false, str::is_empty);

    // a caret hugging a boundary with nothing selected on its side of
    // that boundary must not pull the boundary node in - unless the node
    // is an empty text node, which the caret alone still covers
    let skip_start = start.is_caret_at_end(tree) && !is_empty_text_node(start);
    let skip_end = end.is_caret_at_start(tree) && !is_empty_text_node(end);

    let start_anchor = nodes
        .last_content_node_of(tree, start.node)
        .ok_or(SelectionError::AnchorNotFound(start.node))?;
    let end_anchor = nodes
        .first_content_node_of(tree, end.node)
        .ok_or(SelectionError::AnchorNotFound(end.node))?;

    Ok(slice_between(
        &parent_content_nodes,
        start_anchor,
        end_anchor,
        skip_start,
        skip_end,
    ))
}

/// First ancestor of `start` whose subtree contains `end`.
fn find_common_ancestor(
    tree: &DomTree,
    start: NodeId,
    end: NodeId,
) -> Result<NodeId, SelectionError> {
    let mut current = tree.parent(start);
    while let Some(node) = current {
        if tree.contains(node, end) {
            return Ok(node);
        }
        current = tree.parent(node);
    }
    Err(SelectionError::NoCommonAncestor(start, end))
}

fn slice_between(
    list: &[NodeId],
    start_node: NodeId,
    end_node: NodeId,
    skip_start: bool,
    skip_end: bool,
) -> Vec<NodeId> {
    let (Some(start_index), Some(end_index)) = (
        list.iter().position(|&n| n == start_node),
        list.iter().position(|&n| n == end_node),
    ) else {
        return Vec::new();
    };

    let mut start_index = start_index as isize;
    let mut end_index = end_index as isize;
    if skip_start {
        start_index += 1;
    }
    if skip_end {
        end_index -= 1;
    }

    if start_index > end_index {
        return Vec::new();
    }
    list[start_index as usize..=end_index as usize].to_vec()
}
