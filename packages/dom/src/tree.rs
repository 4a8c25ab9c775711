//! # Document Tree
//!
//! Arena storage for the live, mutable node tree.
//!
//! ## Design
//!
//! - Nodes are owned by the [`DomTree`] and addressed by [`NodeId`]
//!   handles; a handle stays valid for the lifetime of the tree.
//! - Detaching a node clears its parent link but keeps the subtree in the
//!   arena, so observers can still inspect a removed node's content and
//!   children, and an undo can re-insert it later.
//! - Structural edits go through `insert_child`/`detach`; character data
//!   edits go through `insert_text`/`delete_text` with **char** offsets.
//!
//! Passing a [`NodeId`] minted by a different tree is a logic error and
//! panics; semantic failures (missing parent, bad offsets, wrong node
//! kind) are reported as [`DomError`].

use crate::error::DomError;
use crate::position::PositionReference;
use crate::text::{char_len, char_to_byte};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable handle to a node owned by a [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node is: an element with a tag and attributes, or a text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag: String,
        attributes: HashMap<String, String>,
    },
    Text {
        data: String,
    },
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The live document tree.
///
/// Created with an editable root element (the region under observation);
/// all other nodes are created through `create_element`/`create_text` and
/// attached with `insert_child`.
#[derive(Debug)]
pub struct DomTree {
    nodes: HashMap<NodeId, NodeData>,
    root: NodeId,
    next_id: u64,
}

impl DomTree {
    /// Create a tree whose root is an editable `div` (carries the
    /// `contenteditable` attribute that bounds content-node traversal).
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        let root = NodeId(0);
        let mut attributes = HashMap::new();
        attributes.insert("contenteditable".to_string(), "true".to_string());
        nodes.insert(
            root,
            NodeData {
                kind: NodeKind::Element {
                    tag: "div".to_string(),
                    attributes,
                },
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    /// The editable root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &NodeData {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("node {id} does not belong to this tree"))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("node {id} does not belong to this tree"))
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            NodeData {
                kind,
                parent: None,
                children: Vec::new(),
            },
        );
        id
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Element {
            tag: tag.into(),
            attributes: HashMap::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, data: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text { data: data.into() })
    }

    /// The node's kind.
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.node(node).kind
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.node(node).kind, NodeKind::Text { .. })
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.node(node).kind, NodeKind::Element { .. })
    }

    /// Element tag, or `None` for text nodes.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    /// Attribute value, or `None` for text nodes and unset attributes.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let NodeKind::Element { attributes, .. } = &mut self.node_mut(node).kind {
            attributes.insert(name.into(), value.into());
        }
    }

    // ---- structure ----

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.node(node).children.len()
    }

    pub fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.node(node).children.get(index).copied()
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).children.first().copied()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.node(node).parent?;
        let siblings = &self.node(parent).children;
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.node(node).parent?;
        let siblings = &self.node(parent).children;
        let index = siblings.iter().position(|&c| c == node)?;
        index.checked_sub(1).and_then(|i| siblings.get(i).copied())
    }

    /// True when `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.node(n).parent;
        }
        false
    }

    /// The (parent, index) pair locating `node` among its siblings.
    pub fn position_of(&self, node: NodeId) -> Result<PositionReference, DomError> {
        let parent = self.node(node).parent.ok_or(DomError::NoParent(node))?;
        let position = self
            .node(parent)
            .children
            .iter()
            .position(|&c| c == node)
            .expect("parent link without matching child entry");
        Ok(PositionReference {
            container: parent,
            position,
        })
    }

    /// Insert `child` into `parent`'s child list at `index`
    /// (insert-before semantics, `index == child_count` appends).
    ///
    /// An already-attached child is detached from its old parent first.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), DomError> {
        if self.is_text(parent) {
            return Err(DomError::TextParent(parent));
        }
        if self.contains(child, parent) {
            return Err(DomError::CycleDetected(child));
        }
        let count = self.child_count(parent);
        if index > count {
            return Err(DomError::ChildIndexOutOfBounds { index, count });
        }
        if self.node(child).parent.is_some() {
            self.detach(child)?;
        }
        // a same-parent move may have shifted the target index down by one
        let at = index.min(self.child_count(parent));
        self.node_mut(parent).children.insert(at, child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Append `child` as `parent`'s last child.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_child(parent, self.child_count(parent), child)
    }

    /// Remove `node` from its parent. The subtree stays in the arena
    /// (content and children remain readable, and re-insertion is legal).
    pub fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        let parent = self.node(node).parent.ok_or(DomError::NoParent(node))?;
        self.node_mut(parent).children.retain(|&c| c != node);
        self.node_mut(node).parent = None;
        Ok(())
    }

    /// The subtree rooted at `node` in document (pre-)order, `node` first.
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            for &child in self.node(n).children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    // ---- character data ----

    /// Text content of a text node.
    pub fn text(&self, node: NodeId) -> Result<&str, DomError> {
        match &self.node(node).kind {
            NodeKind::Text { data } => Ok(data),
            NodeKind::Element { .. } => Err(DomError::NotAText(node)),
        }
    }

    /// Length of a text node in chars.
    pub fn text_len(&self, node: NodeId) -> Result<usize, DomError> {
        Ok(char_len(self.text(node)?))
    }

    /// Splice `text` into the node's data at char offset `offset`.
    pub fn insert_text(&mut self, node: NodeId, offset: usize, text: &str) -> Result<(), DomError> {
        let data = match &mut self.node_mut(node).kind {
            NodeKind::Text { data } => data,
            NodeKind::Element { .. } => return Err(DomError::NotAText(node)),
        };
        let len = char_len(data);
        let at = char_to_byte(data, offset)
            .ok_or(DomError::TextOffsetOutOfBounds { offset, len })?;
        data.insert_str(at, text);
        Ok(())
    }

    /// Remove the char range `[start, end)` from the node's data and
    /// return the removed text.
    pub fn delete_text(
        &mut self,
        node: NodeId,
        start: usize,
        end: usize,
    ) -> Result<String, DomError> {
        let data = match &mut self.node_mut(node).kind {
            NodeKind::Text { data } => data,
            NodeKind::Element { .. } => return Err(DomError::NotAText(node)),
        };
        let len = char_len(data);
        if start > end || end > len {
            return Err(DomError::InvalidTextRange { start, end, len });
        }
        let from = char_to_byte(data, start).expect("start validated against length");
        let to = char_to_byte(data, end).expect("end validated against length");
        Ok(data.drain(from..to).collect())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_detach_children() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        let c = tree.create_text("c");

        tree.append_child(root, a).unwrap();
        tree.append_child(root, c).unwrap();
        tree.insert_child(root, 1, b).unwrap();
        assert_eq!(tree.children(root), &[a, b, c]);

        tree.detach(b).unwrap();
        assert_eq!(tree.children(root), &[a, c]);
        assert_eq!(tree.parent(b), None);
        // detached node keeps its content
        assert_eq!(tree.text(b).unwrap(), "b");
    }

    #[test]
    fn insert_moves_attached_node() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let wrapper = tree.create_element("strong");
        let text = tree.create_text("x");
        tree.append_child(root, wrapper).unwrap();
        tree.append_child(root, text).unwrap();

        tree.insert_child(wrapper, 0, text).unwrap();
        assert_eq!(tree.children(root), &[wrapper]);
        assert_eq!(tree.children(wrapper), &[text]);
    }

    #[test]
    fn insert_rejects_cycle_and_bad_index() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let outer = tree.create_element("div");
        let inner = tree.create_element("span");
        tree.append_child(root, outer).unwrap();
        tree.append_child(outer, inner).unwrap();

        assert_eq!(
            tree.insert_child(inner, 0, outer),
            Err(DomError::CycleDetected(outer))
        );
        let loose = tree.create_text("x");
        assert_eq!(
            tree.insert_child(root, 5, loose),
            Err(DomError::ChildIndexOutOfBounds { index: 5, count: 1 })
        );
    }

    #[test]
    fn position_of_reports_parent_and_index() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();

        let pos = tree.position_of(b).unwrap();
        assert_eq!(pos.container, root);
        assert_eq!(pos.position, 1);
        assert_eq!(tree.position_of(root), Err(DomError::NoParent(root)));
    }

    #[test]
    fn text_splicing_uses_char_offsets() {
        let mut tree = DomTree::new();
        let text = tree.create_text("añb");
        tree.insert_text(text, 2, "X").unwrap();
        assert_eq!(tree.text(text).unwrap(), "añXb");

        let removed = tree.delete_text(text, 1, 3).unwrap();
        assert_eq!(removed, "ñX");
        assert_eq!(tree.text(text).unwrap(), "ab");

        assert_eq!(
            tree.delete_text(text, 1, 9),
            Err(DomError::InvalidTextRange {
                start: 1,
                end: 9,
                len: 2
            })
        );
    }

    #[test]
    fn subtree_is_preorder() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let list = tree.create_element("ul");
        let item = tree.create_element("li");
        let text = tree.create_text("one");
        let tail = tree.create_text("tail");
        tree.append_child(root, list).unwrap();
        tree.append_child(list, item).unwrap();
        tree.append_child(item, text).unwrap();
        tree.append_child(root, tail).unwrap();

        assert_eq!(tree.subtree(root), vec![root, list, item, text, tail]);
    }
}
