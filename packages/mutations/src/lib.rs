//! # Scribe Mutations
//!
//! The six reversible semantic operations the editing core is built on:
//! node insertion/deletion, text insertion/deletion, and the composite
//! text merging/splitting pair.
//!
//! ## Construction paths
//!
//! Every mutation can be built two ways:
//!
//! 1. **`apply`** - validates its inputs, performs the effect on the
//!    tree immediately, and returns the executed instance. A failed
//!    `apply` leaves the tree untouched.
//! 2. **`from_observed`** - reconstructs the mutation from facts about a
//!    change that already happened (no effect performed), for undo
//!    stacks, analytics, or the recognition engine.
//!
//! `execute` re-runs the forward effect of a manually constructed
//! mutation; unlike `apply` it may surface an error after checking but
//! before mutating each composite step, which is the accepted risk of
//! the lower-level path. `undo` performs the exact inverse effect.

mod error;
mod mutation;
mod node_ops;
mod text_ops;
mod transaction;

pub use error::MutationError;
pub use mutation::{Mutation, MutationKind, MutationSummary};
pub use node_ops::{NodeDeletion, NodeInsertion};
pub use text_ops::{Placement, TextDeletion, TextInsertion, TextMerging, TextSplitting};
pub use transaction::{ScanFrom, Transaction};
