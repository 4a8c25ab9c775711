//! Error types for selection construction and queries

use scribe_dom::{DomError, NodeId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Nodes {0} and {1} share no common ancestor")]
    NoCommonAncestor(NodeId, NodeId),

    #[error("Selection anchor not found near node {0}")]
    AnchorNotFound(NodeId),

    #[error("Node {0} is not selected")]
    NotSelected(NodeId),

    #[error("Selected content is not text")]
    NotATextRange,

    #[error("Insertion position cannot decrease below zero")]
    InsertionPositionUnderflow,

    #[error("Unable to identify a selected element at offset {offset} of node {node}")]
    UnresolvedBoundary { node: NodeId, offset: usize },

    #[error(transparent)]
    Dom(#[from] DomError),
}
