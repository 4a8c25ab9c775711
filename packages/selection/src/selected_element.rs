//! A single boundary point of a selection.

use scribe_dom::{char_len, ContentClassifier, Direction, DomTree, NodeId};
use serde::{Deserialize, Serialize};

/// Where a boundary sits relative to a non-text node: immediately
/// before it, immediately after it, or (for text nodes) exactly at a
/// char offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelativePosition {
    Before,
    After,
    Exact,
}

/// One end of a selection: a node plus either a char offset (text
/// nodes) or a relative position (everything else).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedElement {
    pub node: NodeId,
    /// Char offset within the node; only meaningful for text nodes.
    pub offset: usize,
    pub position: RelativePosition,
}

impl SelectedElement {
    /// Boundary at a char offset of a text node (`RelativePosition::Exact`).
    pub fn at_offset(node: NodeId, offset: usize) -> Self {
        Self {
            node,
            offset,
            position: RelativePosition::Exact,
        }
    }

    /// Boundary before or after a node taken as a unit (offset 0).
    pub fn relative(node: NodeId, position: RelativePosition) -> Self {
        Self {
            node,
            offset: 0,
            position,
        }
    }

    pub fn is_text_node(&self, tree: &DomTree) -> bool {
        tree.is_text(self.node)
    }

    pub fn is_content_node(&self, tree: &DomTree, nodes: &impl ContentClassifier) -> bool {
        nodes.is_content_node(tree, self.node)
    }

    /// No content node exists before this one in document order.
    pub fn is_first_element(&self, tree: &DomTree, nodes: &impl ContentClassifier) -> bool {
        nodes
            .adjacent_content_node(tree, self.node, Direction::Backward, false)
            .is_none()
    }

    /// No content node exists after this one in document order.
    pub fn is_last_element(&self, tree: &DomTree, nodes: &impl ContentClassifier) -> bool {
        nodes
            .adjacent_content_node(tree, self.node, Direction::Forward, false)
            .is_none()
    }

    /// The caret sits at the very start of this node.
    pub fn is_caret_at_start(&self, tree: &DomTree) -> bool {
        if tree.is_text(self.node) {
            self.position == RelativePosition::Exact && self.offset == 0
        } else {
            self.position == RelativePosition::Before
        }
    }

    /// The caret sits at the very end of this node.
    pub fn is_caret_at_end(&self, tree: &DomTree) -> bool {
        match tree.text(self.node) {
            Ok(data) => self.position == RelativePosition::Exact && self.offset == char_len(data),
            Err(_) => self.position == RelativePosition::After,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TextIsContent;

    impl ContentClassifier for TextIsContent {
        fn is_content_node(&self, tree: &DomTree, node: NodeId) -> bool {
            tree.is_text(node)
        }
    }

    #[test]
    fn caret_edges_for_text_nodes() {
        let mut tree = DomTree::new();
        let node = tree.create_text("ab");

        assert!(SelectedElement::at_offset(node, 0).is_caret_at_start(&tree));
        assert!(!SelectedElement::at_offset(node, 1).is_caret_at_start(&tree));
        assert!(SelectedElement::at_offset(node, 2).is_caret_at_end(&tree));
        assert!(!SelectedElement::at_offset(node, 1).is_caret_at_end(&tree));
    }

    #[test]
    fn caret_edges_for_non_text_nodes_follow_relative_position() {
        let mut tree = DomTree::new();
        let node = tree.create_element("img");

        let before = SelectedElement::relative(node, RelativePosition::Before);
        let after = SelectedElement::relative(node, RelativePosition::After);
        assert!(before.is_caret_at_start(&tree));
        assert!(!before.is_caret_at_end(&tree));
        assert!(after.is_caret_at_end(&tree));
        assert!(!after.is_caret_at_start(&tree));
    }

    #[test]
    fn first_and_last_element_look_past_siblings() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let wrapper = tree.create_element("strong");
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        tree.append_child(root, wrapper).unwrap();
        tree.append_child(wrapper, a).unwrap();
        tree.append_child(root, b).unwrap();

        assert!(SelectedElement::at_offset(a, 0).is_first_element(&tree, &TextIsContent));
        assert!(!SelectedElement::at_offset(a, 0).is_last_element(&tree, &TextIsContent));
        assert!(SelectedElement::at_offset(b, 0).is_last_element(&tree, &TextIsContent));
        assert!(!SelectedElement::at_offset(b, 0).is_first_element(&tree, &TextIsContent));
    }
}
