//! Single-field edit mode.
//!
//! The scoreboard edits one value at a time: pick a target, prefill the
//! input with what is stored, then commit or cancel.

use crate::ledger::{self, LedgerError};
use crate::session::SessionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Score { player: usize, round: usize },
    Name { player: usize },
    Penalty { player: usize, index: usize },
    HandTarget,
    TargetScore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub target: EditTarget,
    pub text: String,
}

impl EditSession {
    /// Open an edit, prefilled with the stored value. Targets that no longer
    /// exist prefill as empty and fail on commit.
    #[must_use]
    pub fn begin(record: &SessionRecord, target: EditTarget) -> Self {
        let text = match target {
            EditTarget::Score { player, round } => record
                .rounds
                .get(player)
                .and_then(|row| row.get(round))
                .map(ToString::to_string),
            EditTarget::Name { player } => record.players.get(player).cloned(),
            EditTarget::Penalty { player, index } => record
                .penalties
                .get(player)
                .and_then(|row| row.get(index))
                .map(ToString::to_string),
            EditTarget::HandTarget => Some(record.hand_target.to_string()),
            EditTarget::TargetScore => Some(record.target_score.to_string()),
        };
        Self {
            target,
            text: text.unwrap_or_default(),
        }
    }

    /// Apply the edited text to `record`.
    ///
    /// # Errors
    ///
    /// Whatever the matching ledger operation rejects.
    pub fn commit(&self, record: &SessionRecord) -> Result<SessionRecord, LedgerError> {
        match self.target {
            EditTarget::Score { player, round } => {
                ledger::edit_round(record, player, round, &self.text)
            }
            EditTarget::Name { player } => ledger::rename_player(record, player, &self.text),
            EditTarget::Penalty { player, index } => {
                ledger::edit_penalty(record, player, index, &self.text)
            }
            EditTarget::HandTarget => ledger::set_hand_target(record, &self.text),
            EditTarget::TargetScore => ledger::set_target_score(record, &self.text),
        }
    }
}
