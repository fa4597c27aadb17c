// Copyright 2025 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dismissal and presentation policies.

/// Selects which removed entries' completion callbacks fire when one
/// operation removes several entries at once.
///
/// Batch positions are computed against the original removal batch,
/// closest-to-top first: position `0` is the entry that was visually on top,
/// position `count - 1` is the entry adjacent to the landing target. The
/// decision is made per position before any removal reorders anything, so it
/// is stable even though removal happens back-to-front.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum DismissalPolicy {
    /// Every removed entry's callback fires.
    All,
    /// Only the entry landed on (the last removed, adjacent to the target).
    ///
    /// Typical use: refresh only the destination screen.
    Landing,
    /// Only the topmost entry being removed.
    ///
    /// Typical use: save the visible screen's scroll position.
    #[default]
    Topmost,
}

impl DismissalPolicy {
    /// Returns whether the callback at `position` of a removal batch of
    /// `count` entries should fire under this policy.
    #[must_use]
    pub fn applies(self, position: usize, count: usize) -> bool {
        match self {
            Self::All => true,
            Self::Topmost => position == 0,
            Self::Landing => count != 0 && position == count - 1,
        }
    }
}

/// How a newly presented modal relates to modals already on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum PresentationStyle {
    /// Layer the new modal above the existing ones.
    #[default]
    Stack,
    /// Pop the current top modal first, firing its callback.
    ReplaceLast,
    /// Pop every modal first, firing callbacks most-recently-presented
    /// first.
    ReplaceAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fires_every_position() {
        for i in 0..4 {
            assert!(DismissalPolicy::All.applies(i, 4));
        }
    }

    #[test]
    fn topmost_fires_only_first() {
        assert!(DismissalPolicy::Topmost.applies(0, 3));
        assert!(!DismissalPolicy::Topmost.applies(1, 3));
        assert!(!DismissalPolicy::Topmost.applies(2, 3));
    }

    #[test]
    fn landing_fires_only_last() {
        assert!(!DismissalPolicy::Landing.applies(0, 3));
        assert!(!DismissalPolicy::Landing.applies(1, 3));
        assert!(DismissalPolicy::Landing.applies(2, 3));
    }

    #[test]
    fn single_entry_batch_is_both_topmost_and_landing() {
        assert!(DismissalPolicy::Topmost.applies(0, 1));
        assert!(DismissalPolicy::Landing.applies(0, 1));
    }
}
