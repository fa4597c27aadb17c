// Copyright 2025 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The unified chronological history log and dismiss-to target resolution.
//!
//! History is the single source of truth for "what happened most recently"
//! across the root stack, the modal stack, and every modal's nested stack.
//! Records are appended in call order and only ever removed from the tail
//! (unified dismissal) or as a suffix above a dismiss-to target; they are
//! never reordered or spliced.

use alloc::vec::Vec;

use crate::entry::{EntryId, TypeTag};

/// Which container family a history record's entry was added to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A screen pushed onto the root stack or a modal's nested stack.
    Push,
    /// A modal presented onto the modal stack.
    Modal,
}

/// Where a record's live entry resided when the record was appended.
///
/// Indices are captured at append time. Because removal always proceeds from
/// the most recent record downward, a record's index stays valid until the
/// record itself is processed; anything else is a stale location and is
/// skipped defensively.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// The region's root view. A marker only: it has no container entry and
    /// is never removed by dismissal.
    Root,
    /// `root_stack[index]`.
    RootPush(usize),
    /// `modal_stack[index]`.
    ModalTop(usize),
    /// `modal_screens[&modal][index]`.
    ModalPush {
        /// Id of the owning modal.
        modal: EntryId,
        /// Index within that modal's nested stack.
        index: usize,
    },
}

/// One line of the chronological history log.
#[derive(Clone, Debug)]
pub struct HistoryRecord {
    pub(crate) id: EntryId,
    pub(crate) tag: TypeTag,
    pub(crate) kind: RecordKind,
    pub(crate) location: Location,
}

impl HistoryRecord {
    /// Id of the entry this record describes.
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Type tag of the entry this record describes.
    #[must_use]
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Whether the entry was pushed or presented.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Where the entry resided when the record was appended.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }
}

/// Which occurrence of a tag dismiss-to navigates back to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TargetResolution {
    /// The first (oldest) occurrence in history.
    Root,
    /// The most recent occurrence, skipping past the current top when the
    /// most recent match is already on top and another match exists.
    #[default]
    Recent,
}

/// Outcome of resolving a dismiss-to target against history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ResolvedTarget {
    /// Dismiss everything strictly after this history index.
    At(usize),
    /// The only match is the current top; nothing to do.
    AlreadyAtTarget,
    /// No record carries the requested tag.
    NotFound,
}

/// Resolves the history index to land on for a dismiss-to request.
///
/// `Recent` mode intentionally never considers the oldest occurrence when the
/// most recent match is not on top; that asymmetry with `Root` mode is a
/// fixed contract, pinned by tests.
pub(crate) fn resolve_target(
    history: &[HistoryRecord],
    tag: &TypeTag,
    mode: TargetResolution,
) -> ResolvedTarget {
    match mode {
        TargetResolution::Root => history
            .iter()
            .position(|record| record.tag == *tag)
            .map_or(ResolvedTarget::NotFound, ResolvedTarget::At),
        TargetResolution::Recent => {
            let matches: Vec<usize> = history
                .iter()
                .enumerate()
                .filter_map(|(index, record)| (record.tag == *tag).then_some(index))
                .collect();
            let Some(&most_recent) = matches.last() else {
                return ResolvedTarget::NotFound;
            };
            let top = history.len() - 1;
            if most_recent != top {
                ResolvedTarget::At(most_recent)
            } else if matches.len() > 1 {
                // Already on the most recent match; land on the one before it.
                ResolvedTarget::At(matches[matches.len() - 2])
            } else {
                ResolvedTarget::AlreadyAtTarget
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw_id: u64, tag: &'static str) -> HistoryRecord {
        HistoryRecord {
            id: EntryId::new(raw_id),
            tag: TypeTag::new(tag),
            kind: RecordKind::Push,
            location: Location::RootPush(raw_id as usize),
        }
    }

    fn history(tags: &[&'static str]) -> Vec<HistoryRecord> {
        tags.iter()
            .enumerate()
            .map(|(index, tag)| record(index as u64, tag))
            .collect()
    }

    #[test]
    fn root_mode_picks_first_occurrence() {
        let log = history(&["Root", "A", "B", "A", "C"]);
        assert_eq!(
            resolve_target(&log, &TypeTag::new("A"), TargetResolution::Root),
            ResolvedTarget::At(1)
        );
    }

    #[test]
    fn root_mode_not_found() {
        let log = history(&["Root", "A"]);
        assert_eq!(
            resolve_target(&log, &TypeTag::new("Z"), TargetResolution::Root),
            ResolvedTarget::NotFound
        );
    }

    #[test]
    fn recent_mode_picks_most_recent_when_not_on_top() {
        let log = history(&["Root", "A", "B", "A", "C"]);
        assert_eq!(
            resolve_target(&log, &TypeTag::new("A"), TargetResolution::Recent),
            ResolvedTarget::At(3)
        );
    }

    #[test]
    fn recent_mode_skips_current_top_when_another_match_exists() {
        let log = history(&["Root", "A", "B", "A"]);
        assert_eq!(
            resolve_target(&log, &TypeTag::new("A"), TargetResolution::Recent),
            ResolvedTarget::At(1)
        );
    }

    #[test]
    fn recent_mode_single_match_on_top_is_already_there() {
        let log = history(&["Root", "B", "A"]);
        assert_eq!(
            resolve_target(&log, &TypeTag::new("A"), TargetResolution::Recent),
            ResolvedTarget::AlreadyAtTarget
        );
    }

    #[test]
    fn recent_mode_single_match_below_top_is_targeted() {
        let log = history(&["Root", "A", "B"]);
        assert_eq!(
            resolve_target(&log, &TypeTag::new("A"), TargetResolution::Recent),
            ResolvedTarget::At(1)
        );
    }
}
