//! The mutation sum type, kind tags, and serializable summaries.

use crate::error::MutationError;
use crate::node_ops::{NodeDeletion, NodeInsertion};
use crate::text_ops::{Placement, TextDeletion, TextInsertion, TextMerging, TextSplitting};
use scribe_dom::{DomTree, NodeId, PositionReference};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag carried by every mutation, immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MutationKind {
    NodeInsertion,
    NodeDeletion,
    TextInsertion,
    TextDeletion,
    TextMerging,
    TextSplitting,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::NodeInsertion => "nodeInsertion",
            MutationKind::NodeDeletion => "nodeDeletion",
            MutationKind::TextInsertion => "textInsertion",
            MutationKind::TextDeletion => "textDeletion",
            MutationKind::TextMerging => "textMerging",
            MutationKind::TextSplitting => "textSplitting",
        };
        f.write_str(name)
    }
}

/// Any of the six semantic mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    NodeInsertion(NodeInsertion),
    NodeDeletion(NodeDeletion),
    TextInsertion(TextInsertion),
    TextDeletion(TextDeletion),
    TextMerging(TextMerging),
    TextSplitting(TextSplitting),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::NodeInsertion(_) => MutationKind::NodeInsertion,
            Mutation::NodeDeletion(_) => MutationKind::NodeDeletion,
            Mutation::TextInsertion(_) => MutationKind::TextInsertion,
            Mutation::TextDeletion(_) => MutationKind::TextDeletion,
            Mutation::TextMerging(_) => MutationKind::TextMerging,
            Mutation::TextSplitting(_) => MutationKind::TextSplitting,
        }
    }

    pub fn position_reference(&self) -> PositionReference {
        match self {
            Mutation::NodeInsertion(m) => m.position_reference,
            Mutation::NodeDeletion(m) => m.position_reference,
            Mutation::TextInsertion(m) => m.position_reference,
            Mutation::TextDeletion(m) => m.position_reference,
            Mutation::TextMerging(m) => m.position_reference,
            Mutation::TextSplitting(m) => m.position_reference,
        }
    }

    /// Perform the forward effect. Calling this twice on one instance is
    /// undefined.
    pub fn execute(&mut self, tree: &mut DomTree) -> Result<(), MutationError> {
        match self {
            Mutation::NodeInsertion(m) => m.execute(tree),
            Mutation::NodeDeletion(m) => m.execute(tree),
            Mutation::TextInsertion(m) => m.execute(tree),
            Mutation::TextDeletion(m) => m.execute(tree),
            Mutation::TextMerging(m) => m.execute(tree),
            Mutation::TextSplitting(m) => m.execute(tree),
        }
    }

    /// Perform the exact inverse effect.
    pub fn undo(&self, tree: &mut DomTree) -> Result<(), MutationError> {
        match self {
            Mutation::NodeInsertion(m) => m.undo(tree),
            Mutation::NodeDeletion(m) => m.undo(tree),
            Mutation::TextInsertion(m) => m.undo(tree),
            Mutation::TextDeletion(m) => m.undo(tree),
            Mutation::TextMerging(m) => m.undo(tree),
            Mutation::TextSplitting(m) => m.undo(tree),
        }
    }

    /// The scalar facts of this mutation, for logs and analytics.
    pub fn summary(&self) -> MutationSummary {
        match self {
            Mutation::NodeInsertion(m) => MutationSummary::NodeInsertion {
                node: m.inserted_node,
                container: m.position_reference.container,
                position: m.position_reference.position,
            },
            Mutation::NodeDeletion(m) => MutationSummary::NodeDeletion {
                node: m.deleted_node,
                container: m.position_reference.container,
                position: m.position_reference.position,
            },
            Mutation::TextInsertion(m) => MutationSummary::TextInsertion {
                node: m.position_reference.container,
                offset: m.position_reference.position,
                text: m.inserted_text.clone(),
            },
            Mutation::TextDeletion(m) => MutationSummary::TextDeletion {
                node: m.position_reference.container,
                start: m.position_reference.position,
                end: m.end_offset,
                text: m.deleted_text.clone(),
            },
            Mutation::TextMerging(m) => MutationSummary::TextMerging {
                left: m.position_reference.container,
                right: m.removed_node,
                offset: m.position_reference.position,
                text: m.appended_text.clone(),
            },
            Mutation::TextSplitting(m) => MutationSummary::TextSplitting {
                node: m.position_reference.container,
                offset: m.position_reference.position,
                placement: m.placement,
                new_node: m.new_node().ok(),
            },
        }
    }
}

impl From<NodeInsertion> for Mutation {
    fn from(m: NodeInsertion) -> Self {
        Mutation::NodeInsertion(m)
    }
}

impl From<NodeDeletion> for Mutation {
    fn from(m: NodeDeletion) -> Self {
        Mutation::NodeDeletion(m)
    }
}

impl From<TextInsertion> for Mutation {
    fn from(m: TextInsertion) -> Self {
        Mutation::TextInsertion(m)
    }
}

impl From<TextDeletion> for Mutation {
    fn from(m: TextDeletion) -> Self {
        Mutation::TextDeletion(m)
    }
}

impl From<TextMerging> for Mutation {
    fn from(m: TextMerging) -> Self {
        Mutation::TextMerging(m)
    }
}

impl From<TextSplitting> for Mutation {
    fn from(m: TextSplitting) -> Self {
        Mutation::TextSplitting(m)
    }
}

/// Flat, serializable record of a mutation's facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MutationSummary {
    NodeInsertion {
        node: NodeId,
        container: NodeId,
        position: usize,
    },
    NodeDeletion {
        node: NodeId,
        container: NodeId,
        position: usize,
    },
    TextInsertion {
        node: NodeId,
        offset: usize,
        text: String,
    },
    TextDeletion {
        node: NodeId,
        start: usize,
        end: usize,
        text: String,
    },
    TextMerging {
        left: NodeId,
        right: NodeId,
        offset: usize,
        text: String,
    },
    TextSplitting {
        node: NodeId,
        offset: usize,
        placement: Placement,
        new_node: Option<NodeId>,
    },
}
