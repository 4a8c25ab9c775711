//! Error types for mutation construction and execution

use scribe_dom::{DomError, NodeId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Node {0} is not a text node")]
    NotAText(NodeId),

    #[error("Insertion position {position} is out of bounds ({count} children)")]
    InsertionOutOfBounds { position: usize, count: usize },

    #[error("Offset {offset} is out of bounds (length {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("Splitting offset {offset} must fall strictly inside the text (length {len})")]
    SplitOffsetOutOfBounds { offset: usize, len: usize },

    #[error("Node {0} has no parent")]
    NoParent(NodeId),

    #[error("Split node has not been created yet; execute the mutation first")]
    NotExecuted,

    #[error(transparent)]
    Dom(#[from] DomError),
}
