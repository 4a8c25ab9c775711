//! # Scribe Observer
//!
//! The mutation recognition engine: raw change records from the host's
//! tree observation primitive go in, semantic mutations come out.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ host: structural + character-data records    │
//! └──────────────────────────────────────────────┘
//!                     ↓ enqueue (coalesced per batch)
//! ┌──────────────────────────────────────────────┐
//! │ observer: classify records in arrival order  │
//! │  - position index keeps (parent, index) per  │
//! │    node, surviving detachment                │
//! │  - text deltas resolved against selection    │
//! │    snapshots                                 │
//! │  - merge/split recognized from the previous  │
//! │    mutation of the same batch                │
//! └──────────────────────────────────────────────┘
//!                     ↓ dispatch (per kind, production order)
//! ┌──────────────────────────────────────────────┐
//! │ registered handlers                          │
//! └──────────────────────────────────────────────┘
//! ```

mod error;
mod position_index;
mod record;
mod recognizer;

pub use error::RecognizerError;
pub use position_index::{IndexedPosition, PositionIndex};
pub use record::ChangeRecord;
pub use recognizer::{MutationRecognizer, RecognitionPolicy, RecognizerConfig};
