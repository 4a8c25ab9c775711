//! # Scribe Selection
//!
//! Structured selection state over the live tree.
//!
//! A native caret or range arrives as raw (container, offset) pairs;
//! this crate turns them into [`SelectedElement`] boundary points and a
//! [`StoredSelection`] that knows its insertion point and which content
//! nodes the range covers. The recognition engine reads these snapshots
//! to disambiguate text-length deltas.

mod error;
mod resolve;
mod selected_element;
mod stored_selection;

pub use error::SelectionError;
pub use resolve::{fallback_selection, resolve_boundary, SelectionSnapshots, SelectionTracker};
pub use selected_element::{RelativePosition, SelectedElement};
pub use stored_selection::{StoredSelection, TextOffsets};
