//! Selection scenarios exercising the crate end to end.

use scribe_dom::{ContentClassifier, DomTree, NodeId};
use scribe_selection::{RelativePosition, SelectedElement, SelectionError, StoredSelection};

struct TestNodes;

impl ContentClassifier for TestNodes {
    fn is_content_node(&self, tree: &DomTree, node: NodeId) -> bool {
        tree.is_text(node) || matches!(tree.tag(node), Some("br") | Some("img"))
    }
}

#[test]
fn range_across_two_text_nodes_reports_per_node_offsets() {
    // <div> "Hello, " "world!" </div>, selected from (n1, 0) to (n2, 6)
    let mut tree = DomTree::new();
    let root = tree.root();
    let hello = tree.create_text("Hello, ");
    let world = tree.create_text("world!");
    tree.append_child(root, hello).unwrap();
    tree.append_child(root, world).unwrap();

    let selection = StoredSelection::new(
        &tree,
        &TestNodes,
        root,
        SelectedElement::at_offset(hello, 0),
        SelectedElement::at_offset(world, 6),
        false,
    )
    .unwrap();

    assert_eq!(selection.selected_nodes(), &[hello, world]);

    let first = selection.find_text_node_offsets(&tree, hello).unwrap();
    assert_eq!((first.start, first.end), (0, 7));
    let second = selection.find_text_node_offsets(&tree, world).unwrap();
    assert_eq!((second.start, second.end), (0, 6));
}

#[test]
fn unselected_node_has_no_offsets() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let a = tree.create_text("aa");
    let b = tree.create_text("bb");
    tree.append_child(root, a).unwrap();
    tree.append_child(root, b).unwrap();

    let selection = StoredSelection::new(
        &tree,
        &TestNodes,
        root,
        SelectedElement::at_offset(a, 0),
        SelectedElement::at_offset(a, 1),
        false,
    )
    .unwrap();

    assert_eq!(
        selection.find_text_node_offsets(&tree, b),
        Err(SelectionError::NotSelected(b))
    );
}

#[test]
fn insertion_point_around_a_leaf_element() {
    // <div> "before" <img> "after" </div>, boundary on the image unit
    let mut tree = DomTree::new();
    let root = tree.root();
    let before = tree.create_text("before");
    let image = tree.create_element("img");
    let after = tree.create_text("after");
    for n in [before, image, after] {
        tree.append_child(root, n).unwrap();
    }

    let past_image = StoredSelection::new(
        &tree,
        &TestNodes,
        root,
        SelectedElement::relative(image, RelativePosition::After),
        SelectedElement::relative(image, RelativePosition::After),
        true,
    )
    .unwrap();
    assert_eq!(past_image.insertion_point().container, root);
    assert_eq!(past_image.insertion_point().position, 2);

    let at_image = StoredSelection::new(
        &tree,
        &TestNodes,
        root,
        SelectedElement::relative(image, RelativePosition::Before),
        SelectedElement::relative(image, RelativePosition::Before),
        true,
    )
    .unwrap();
    assert_eq!(at_image.insertion_point().container, root);
    assert_eq!(at_image.insertion_point().position, 1);
}

#[test]
fn selection_edges_of_the_editable_region() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let first = tree.create_text("aa");
    let last = tree.create_text("bb");
    tree.append_child(root, first).unwrap();
    tree.append_child(root, last).unwrap();

    let selection = StoredSelection::new(
        &tree,
        &TestNodes,
        root,
        SelectedElement::at_offset(first, 0),
        SelectedElement::at_offset(last, 2),
        false,
    )
    .unwrap();

    assert!(selection.is_at_start(&tree, &TestNodes));
    assert!(selection.is_at_end(&tree, &TestNodes));

    let inner = StoredSelection::new(
        &tree,
        &TestNodes,
        root,
        SelectedElement::at_offset(first, 1),
        SelectedElement::at_offset(last, 1),
        false,
    )
    .unwrap();
    assert!(!inner.is_at_start(&tree, &TestNodes));
    assert!(!inner.is_at_end(&tree, &TestNodes));
}

#[test]
fn selected_text_of_a_single_node_range() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let node = tree.create_text("Hello, world!");
    tree.append_child(root, node).unwrap();

    let selection = StoredSelection::new(
        &tree,
        &TestNodes,
        root,
        SelectedElement::at_offset(node, 7),
        SelectedElement::at_offset(node, 12),
        false,
    )
    .unwrap();
    assert_eq!(selection.selected_text(&tree).unwrap(), "world");

    let mut tree2 = DomTree::new();
    let root2 = tree2.root();
    let a = tree2.create_text("aa");
    let b = tree2.create_text("bb");
    tree2.append_child(root2, a).unwrap();
    tree2.append_child(root2, b).unwrap();
    let spanning = StoredSelection::new(
        &tree2,
        &TestNodes,
        root2,
        SelectedElement::at_offset(a, 0),
        SelectedElement::at_offset(b, 1),
        false,
    )
    .unwrap();
    assert_eq!(
        spanning.selected_text(&tree2),
        Err(SelectionError::NotATextRange)
    );
}
