//! Raw change records as delivered by the host's tree observation
//! primitive.

use scribe_dom::NodeId;

/// One low-level change notification. Structural changes name the added
/// and removed nodes with their previous-sibling context; character-data
/// changes carry the old string value (the new value is read from the
/// live node at classification time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeRecord {
    ChildList {
        /// The parent whose child list changed.
        target: NodeId,
        added: Vec<NodeId>,
        removed: Vec<NodeId>,
        /// The sibling immediately before the change site, if any.
        previous_sibling: Option<NodeId>,
    },
    CharacterData {
        /// The text node whose data changed.
        target: NodeId,
        old_value: String,
    },
    /// Attribute changes are observed but produce no semantic mutation.
    Attributes { target: NodeId },
}

impl ChangeRecord {
    pub fn target(&self) -> NodeId {
        match self {
            ChangeRecord::ChildList { target, .. } => *target,
            ChangeRecord::CharacterData { target, .. } => *target,
            ChangeRecord::Attributes { target } => *target,
        }
    }
}
