//! Turning raw host caret/range coordinates into structured selections,
//! and the snapshot provider the recognition engine reads.

use crate::error::SelectionError;
use crate::selected_element::{RelativePosition, SelectedElement};
use crate::stored_selection::StoredSelection;
use scribe_dom::{ContentClassifier, DomTree, NodeId};
use tracing::debug;

/// Supplies the selection snapshots the recognition engine needs: the
/// state right now and the state just before the last change.
pub trait SelectionSnapshots {
    fn current(&self) -> StoredSelection;
    fn previous(&self) -> StoredSelection;
}

/// Resolve one native boundary - a (container, offset) pair as host
/// selection APIs report it - into a [`SelectedElement`].
///
/// For a text container the offset is a char offset. For an element
/// container the offset counts children: the boundary binds to the
/// child before it (as an `After` unit) when that child exists and is
/// not text, otherwise to the child at the offset (`Before` for
/// elements, caret-at-start for text).
pub fn resolve_boundary(
    tree: &DomTree,
    container: NodeId,
    offset: usize,
) -> Result<SelectedElement, SelectionError> {
    if tree.is_text(container) {
        return Ok(SelectedElement::at_offset(container, offset));
    }

    if offset > 0 {
        if let Some(previous) = tree.child_at(container, offset - 1) {
            if !tree.is_text(previous) {
                return Ok(SelectedElement::relative(previous, RelativePosition::After));
            }
        }
    }

    if let Some(next) = tree.child_at(container, offset) {
        return Ok(if tree.is_text(next) {
            SelectedElement::at_offset(next, 0)
        } else {
            SelectedElement::relative(next, RelativePosition::Before)
        });
    }

    Err(SelectionError::UnresolvedBoundary {
        node: container,
        offset,
    })
}

/// A collapsed selection at the first content node under `root`, for
/// hosts that report no usable selection. Creates an empty text node
/// when the root has no content at all.
pub fn fallback_selection(
    tree: &mut DomTree,
    nodes: &impl ContentClassifier,
    root: NodeId,
) -> Result<StoredSelection, SelectionError> {
    debug!(%root, "no usable selection, falling back to first content node");
    let content = nodes.content_nodes_or_fill(tree, root)?[0];
    let (container, offset) = if tree.is_text(content) {
        (content, 0)
    } else {
        let position = tree.position_of(content)?;
        (position.container, position.position)
    };

    let element = resolve_boundary(tree, container, offset)?;
    StoredSelection::new(tree, nodes, root, element, element, true)
}

/// Keeps the current and previous [`StoredSelection`] snapshots,
/// rotating them on every recorded change.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    previous: StoredSelection,
    current: StoredSelection,
}

impl SelectionTracker {
    /// Start with one snapshot filling both slots.
    pub fn new(initial: StoredSelection) -> Self {
        Self {
            previous: initial.clone(),
            current: initial,
        }
    }

    /// Store a newly captured selection; the old current becomes the
    /// previous snapshot.
    pub fn record(&mut self, selection: StoredSelection) {
        self.previous = std::mem::replace(&mut self.current, selection);
    }
}

impl SelectionSnapshots for SelectionTracker {
    fn current(&self) -> StoredSelection {
        self.current.clone()
    }

    fn previous(&self) -> StoredSelection {
        self.previous.clone()
    }
}

/// A shared tracker works as a snapshot source too, so one tracker can
/// feed both the host's selection handler and the observer.
impl<S: SelectionSnapshots> SelectionSnapshots for std::rc::Rc<std::cell::RefCell<S>> {
    fn current(&self) -> StoredSelection {
        self.borrow().current()
    }

    fn previous(&self) -> StoredSelection {
        self.borrow().previous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestNodes;

    impl ContentClassifier for TestNodes {
        fn is_content_node(&self, tree: &DomTree, node: NodeId) -> bool {
            tree.is_text(node) || matches!(tree.tag(node), Some("br") | Some("img"))
        }
    }

    #[test]
    fn text_container_resolves_to_exact_offset() {
        let mut tree = DomTree::new();
        let text = tree.create_text("ab");
        let element = resolve_boundary(&tree, text, 1).unwrap();
        assert_eq!(element, SelectedElement::at_offset(text, 1));
    }

    #[test]
    fn element_container_binds_to_surrounding_children() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let img = tree.create_element("img");
        let text = tree.create_text("x");
        tree.append_child(root, img).unwrap();
        tree.append_child(root, text).unwrap();

        // offset 1: previous child is the (non-text) image
        assert_eq!(
            resolve_boundary(&tree, root, 1).unwrap(),
            SelectedElement::relative(img, RelativePosition::After)
        );
        // offset 0: next child is the image
        assert_eq!(
            resolve_boundary(&tree, root, 0).unwrap(),
            SelectedElement::relative(img, RelativePosition::Before)
        );
        // offset 2: previous child is text and there is no next child
        assert!(resolve_boundary(&tree, root, 2).is_err());
    }

    #[test]
    fn boundary_after_text_child_binds_to_next_child() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let text = tree.create_text("x");
        let img = tree.create_element("img");
        tree.append_child(root, text).unwrap();
        tree.append_child(root, img).unwrap();

        assert_eq!(
            resolve_boundary(&tree, root, 1).unwrap(),
            SelectedElement::relative(img, RelativePosition::Before)
        );
    }

    #[test]
    fn fallback_points_at_first_content_node() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let text = tree.create_text("hello");
        tree.append_child(root, text).unwrap();

        let selection = fallback_selection(&mut tree, &TestNodes, root).unwrap();
        assert!(selection.collapsed);
        assert_eq!(selection.start, SelectedElement::at_offset(text, 0));
    }

    #[test]
    fn fallback_fills_an_empty_root() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let selection = fallback_selection(&mut tree, &TestNodes, root).unwrap();
        assert!(tree.is_text(selection.start.node));
        assert_eq!(tree.text(selection.start.node).unwrap(), "");
    }

    #[test]
    fn tracker_rotates_snapshots() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();

        let first = StoredSelection::new(
            &tree,
            &TestNodes,
            root,
            SelectedElement::at_offset(a, 0),
            SelectedElement::at_offset(a, 0),
            true,
        )
        .unwrap();
        let second = StoredSelection::new(
            &tree,
            &TestNodes,
            root,
            SelectedElement::at_offset(b, 1),
            SelectedElement::at_offset(b, 1),
            true,
        )
        .unwrap();

        let mut tracker = SelectionTracker::new(first.clone());
        assert_eq!(tracker.previous().start, first.start);

        tracker.record(second.clone());
        assert_eq!(tracker.previous().start, first.start);
        assert_eq!(tracker.current().start, second.start);
    }
}
