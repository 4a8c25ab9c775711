//! # Mutation Recognition
//!
//! Batches raw change records and classifies them into semantic
//! mutations.
//!
//! ## Lifecycle
//!
//! Idle → Batching (records accumulate via [`MutationRecognizer::enqueue`],
//! the host schedules exactly one flush) → Classify → Dispatch → Idle.
//! Records produced by one logical keystroke must land in the same batch:
//! merge/split recognition works by seeing the structural half and the
//! character-data half of the same edit side by side.
//!
//! ## Text classification
//!
//! A character-data record only says "the text changed". The engine
//! compares old and new length, then:
//!
//! - shrink → a deletion; the removed range comes from the active
//!   selection snapshot (the non-collapsed one of current/previous,
//!   since a collapsed caret carries no range),
//! - grow or same → an insertion at the current selection's start
//!   offset,
//!
//! and, under [`RecognitionPolicy::MergeSplit`], first checks whether
//! the change cancels out a text node inserted or deleted immediately
//! before in the same batch - reclassifying the pair as one splitting
//! or merging mutation.

use crate::error::RecognizerError;
use crate::position_index::{IndexedPosition, PositionIndex};
use crate::record::ChangeRecord;
use scribe_dom::{char_len, char_slice, DomTree, NodeId};
use scribe_mutations::{
    Mutation, MutationKind, NodeDeletion, NodeInsertion, Placement, TextDeletion, TextInsertion,
    TextMerging, TextSplitting,
};
use scribe_selection::{SelectionSnapshots, StoredSelection};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// How character-data deltas are classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecognitionPolicy {
    /// Two-case baseline: every shrink is a deletion, everything else an
    /// insertion.
    LengthDelta,
    /// Baseline plus pattern-matching against the previous mutation of
    /// the batch, so a delete+insert pair produced by one edit comes out
    /// as a single merging or splitting mutation.
    #[default]
    MergeSplit,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecognizerConfig {
    pub policy: RecognitionPolicy,
}

type Handler = Box<dyn FnMut(&Mutation)>;

/// The batching mutation recognition engine.
///
/// Holds the position index (seeded from the observed root at
/// construction), the pending record queue, and the handler registry.
/// `S` supplies the selection snapshots used to disambiguate text
/// deltas.
pub struct MutationRecognizer<S> {
    index: PositionIndex,
    pending: Vec<ChangeRecord>,
    flush_scheduled: bool,
    handlers: HashMap<MutationKind, Vec<Handler>>,
    selections: S,
    config: RecognizerConfig,
}

impl<S: SelectionSnapshots> MutationRecognizer<S> {
    pub fn new(tree: &DomTree, selections: S) -> Self {
        Self::with_config(tree, selections, RecognizerConfig::default())
    }

    pub fn with_config(tree: &DomTree, selections: S, config: RecognizerConfig) -> Self {
        let mut index = PositionIndex::new();
        index.seed(tree, tree.root());
        debug!(tracked = index.len(), policy = ?config.policy, "observer initialized");
        Self {
            index,
            pending: Vec::new(),
            flush_scheduled: false,
            handlers: HashMap::new(),
            selections,
            config,
        }
    }

    /// Register a handler for one mutation kind. Handlers of the same
    /// kind run in registration order, once per produced mutation.
    pub fn on(&mut self, kind: MutationKind, handler: impl FnMut(&Mutation) + 'static) {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Queue a raw record. Returns `true` when this call moved the
    /// engine from Idle to Batching - the host must then schedule one
    /// [`flush`](Self::flush) at its next microtask-equivalent boundary.
    /// A scheduled flush cannot be cancelled; further records simply
    /// accumulate into the same batch.
    pub fn enqueue(&mut self, record: ChangeRecord) -> bool {
        self.pending.push(record);
        if self.flush_scheduled {
            return false;
        }
        self.flush_scheduled = true;
        true
    }

    pub fn flush_scheduled(&self) -> bool {
        self.flush_scheduled
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Classify the accumulated batch in arrival order, dispatch every
    /// produced mutation to its registered handlers, and return the
    /// mutations in production order.
    ///
    /// Errors are invariant violations (index out of sync, selection
    /// bookkeeping wrong) and are not retried.
    pub fn flush(&mut self, tree: &DomTree) -> Result<Vec<Mutation>, RecognizerError> {
        self.flush_scheduled = false;
        let records = std::mem::take(&mut self.pending);
        debug!(records = records.len(), "classifying change batch");

        let mut mutations: Vec<Mutation> = Vec::new();
        for record in records {
            match record {
                ChangeRecord::ChildList {
                    target,
                    added,
                    removed,
                    previous_sibling,
                } => {
                    self.classify_structural(
                        tree,
                        target,
                        &added,
                        &removed,
                        previous_sibling,
                        &mut mutations,
                    )?;
                }
                ChangeRecord::CharacterData { target, old_value } => {
                    self.classify_character_data(tree, target, &old_value, &mut mutations)?;
                }
                ChangeRecord::Attributes { target } => {
                    trace!(%target, "attribute record carries no semantic mutation");
                }
            }
        }

        debug!(mutations = mutations.len(), "dispatching batch");
        self.dispatch(&mutations);
        Ok(mutations)
    }

    fn classify_structural(
        &mut self,
        tree: &DomTree,
        target: NodeId,
        added: &[NodeId],
        removed: &[NodeId],
        previous_sibling: Option<NodeId>,
        mutations: &mut Vec<Mutation>,
    ) -> Result<(), RecognizerError> {
        for &node in added {
            let entry = self
                .index
                .record_insertion(tree, node, target, previous_sibling)?;
            trace!(%node, parent = %entry.parent, position = entry.position, "node insertion");
            mutations.push(NodeInsertion::from_observed(node, entry.parent, entry.position).into());
        }
        for &node in removed {
            let entry = self.index.record_removal(tree, node)?;
            trace!(%node, parent = %entry.parent, position = entry.position, "node deletion");
            mutations.push(NodeDeletion::from_observed(node, entry.parent, entry.position).into());
        }
        Ok(())
    }

    fn classify_character_data(
        &mut self,
        tree: &DomTree,
        target: NodeId,
        old_value: &str,
        mutations: &mut Vec<Mutation>,
    ) -> Result<(), RecognizerError> {
        let new_value = tree.text(target)?.to_string();
        let old_len = char_len(old_value);
        let new_len = char_len(&new_value);
        let location = self.index.get(target)?;

        if new_len < old_len {
            if self.config.policy == RecognitionPolicy::MergeSplit {
                if let Some(split) = self.match_splitting(
                    tree,
                    mutations.last(),
                    target,
                    location,
                    old_value,
                    &new_value,
                )? {
                    trace!(%target, "shrink reclassified as text splitting");
                    mutations.pop();
                    mutations.push(split.into());
                    return Ok(());
                }
            }

            let selection = self.pick_non_collapsed();
            let offsets = selection.find_text_node_offsets(tree, target)?;
            let deleted = char_slice(old_value, offsets.start, offsets.end).to_string();
            mutations.push(TextDeletion::from_observed(target, offsets.start, deleted).into());
        } else {
            let delta = new_len - old_len;
            if self.config.policy == RecognitionPolicy::MergeSplit {
                if let Some(merge) = self.match_merging(
                    tree,
                    mutations.last(),
                    target,
                    location.position,
                    &new_value,
                    delta,
                )? {
                    trace!(%target, "growth reclassified as text merging");
                    mutations.pop();
                    mutations.push(merge.into());
                    return Ok(());
                }
            }

            let start = self.selections.current().start.offset;
            mutations.push(TextInsertion::from_observed(tree, target, start, start + delta)?.into());
        }
        Ok(())
    }

    /// A shrink that exactly cancels a text node inserted just before in
    /// this batch, with the surviving text being the old value minus the
    /// inserted node's text at one edge, is a split - the inserted node
    /// is the split-off half.
    fn match_splitting(
        &self,
        tree: &DomTree,
        last: Option<&Mutation>,
        target: NodeId,
        location: IndexedPosition,
        old_value: &str,
        new_value: &str,
    ) -> Result<Option<TextSplitting>, RecognizerError> {
        let Some(Mutation::NodeInsertion(last)) = last else {
            return Ok(None);
        };
        let inserted = last.inserted_node;
        let target_position = location.position;
        let matches_delta = last.position_reference.container == location.parent
            && tree.is_text(inserted)
            && char_len(tree.text(inserted)?) == char_len(old_value) - char_len(new_value);
        if !matches_delta {
            return Ok(None);
        }

        let inserted_text = tree.text(inserted)?;
        let before = last.position_reference.position + 1 == target_position
            && old_value == format!("{inserted_text}{new_value}");
        if before {
            let offset = char_len(old_value) - char_len(new_value);
            return Ok(Some(TextSplitting::from_observed(
                target,
                offset,
                inserted,
                Placement::Before,
            )));
        }

        let after = last.position_reference.position == target_position + 1
            && old_value == format!("{new_value}{inserted_text}");
        if after {
            let offset = char_len(new_value);
            return Ok(Some(TextSplitting::from_observed(
                target,
                offset,
                inserted,
                Placement::After,
            )));
        }
        Ok(None)
    }

    /// A growth that exactly absorbs the text node deleted just before
    /// in this batch - the right-adjacent sibling whose text now ends
    /// the target's value - is a merge.
    fn match_merging(
        &self,
        tree: &DomTree,
        last: Option<&Mutation>,
        target: NodeId,
        target_position: usize,
        new_value: &str,
        delta: usize,
    ) -> Result<Option<TextMerging>, RecognizerError> {
        let Some(Mutation::NodeDeletion(last)) = last else {
            return Ok(None);
        };
        let deleted = last.deleted_node;
        if !tree.is_text(deleted) {
            return Ok(None);
        }
        let deleted_text = tree.text(deleted)?;
        let matches = last.position_reference.position == target_position + 1
            && new_value.ends_with(deleted_text)
            && char_len(deleted_text) == delta;
        if !matches {
            return Ok(None);
        }
        let position = char_len(new_value) - delta;
        Ok(Some(TextMerging::from_observed(
            tree, target, deleted, position,
        )?))
    }

    /// The selection snapshot that actually carries a range: a collapsed
    /// current selection defers to the previous one.
    fn pick_non_collapsed(&self) -> StoredSelection {
        let current = self.selections.current();
        if current.collapsed {
            self.selections.previous()
        } else {
            current
        }
    }

    fn dispatch(&mut self, mutations: &[Mutation]) {
        for mutation in mutations {
            if let Some(handlers) = self.handlers.get_mut(&mutation.kind()) {
                for handler in handlers.iter_mut() {
                    handler(mutation);
                }
            }
        }
    }
}
