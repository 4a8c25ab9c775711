//! Ordered mutation sequences for undo grouping and lookback queries.

use crate::mutation::{Mutation, MutationKind};

/// Which end of the sequence a [`Transaction::find`] scan starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFrom {
    First,
    Last,
}

/// A sequence of mutations recorded in application order.
///
/// Collects the mutations of one logical edit so they can be undone
/// together or queried (e.g. "the last structural change in this
/// batch").
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    mutations: Vec<Mutation>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_mutations(&self) -> bool {
        !self.mutations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn push(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// The first mutation (scanning from the given end) whose kind is in
    /// `kinds`; an empty `kinds` list matches any mutation.
    pub fn find(&self, kinds: &[MutationKind], from: ScanFrom) -> Option<&Mutation> {
        let matches = |m: &&Mutation| kinds.is_empty() || kinds.contains(&m.kind());
        match from {
            ScanFrom::First => self.mutations.iter().find(matches),
            ScanFrom::Last => self.mutations.iter().rev().find(matches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_ops::NodeInsertion;
    use crate::text_ops::TextInsertion;
    use scribe_dom::DomTree;

    #[test]
    fn find_scans_from_either_end() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let text = tree.create_text("");
        tree.append_child(root, text).unwrap();

        let mut tx = Transaction::new();
        assert!(!tx.has_mutations());

        let a = tree.create_element("br");
        let b = tree.create_element("br");
        tx.push(NodeInsertion::apply(&mut tree, a, root, 1).unwrap().into());
        tx.push(TextInsertion::apply(&mut tree, "x", text, 0).unwrap().into());
        tx.push(NodeInsertion::apply(&mut tree, b, root, 2).unwrap().into());

        let first = tx.find(&[MutationKind::NodeInsertion], ScanFrom::First).unwrap();
        let last = tx.find(&[MutationKind::NodeInsertion], ScanFrom::Last).unwrap();
        assert_eq!(first.position_reference().position, 1);
        assert_eq!(last.position_reference().position, 2);

        // empty kind list matches anything
        assert_eq!(
            tx.find(&[], ScanFrom::Last).unwrap().kind(),
            MutationKind::NodeInsertion
        );
        assert!(tx.find(&[MutationKind::TextMerging], ScanFrom::First).is_none());
    }
}
