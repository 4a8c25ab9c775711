//! Error types for mutation recognition

use scribe_dom::{DomError, NodeId};
use scribe_mutations::MutationError;
use scribe_selection::SelectionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecognizerError {
    /// The position index has no entry for a node it should be tracking.
    /// This means the index fell out of sync with the observed tree - a
    /// bug, not a recoverable condition.
    #[error("Node {0} is not tracked by the position index")]
    UntrackedNode(NodeId),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error(transparent)]
    Dom(#[from] DomError),
}
