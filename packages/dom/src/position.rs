//! Position references: a (container, index) pair among a node's children

use crate::tree::NodeId;
use serde::{Deserialize, Serialize};

/// A location among a container's children.
///
/// `position` is a valid insertion index (`0..=child_count`) at the
/// instant the reference is built. References go stale as soon as the
/// surrounding structure changes and must be recomputed rather than
/// patched, except where an operation documents adjusting `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionReference {
    pub container: NodeId,
    pub position: usize,
}

impl PositionReference {
    pub fn new(container: NodeId, position: usize) -> Self {
        Self {
            container,
            position,
        }
    }
}
