//! Error types for tree operations

use crate::tree::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Node {0} has no parent")]
    NoParent(NodeId),

    #[error("Node {0} is not a text node")]
    NotAText(NodeId),

    #[error("Text offset {offset} is out of bounds (length {len})")]
    TextOffsetOutOfBounds { offset: usize, len: usize },

    #[error("Invalid text range {start}..{end} (length {len})")]
    InvalidTextRange {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Child index {index} is out of bounds ({count} children)")]
    ChildIndexOutOfBounds { index: usize, count: usize },

    #[error("Text node {0} cannot have children")]
    TextParent(NodeId),

    #[error("Insertion would make node {0} its own ancestor")]
    CycleDetected(NodeId),
}
