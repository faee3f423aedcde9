//! The round being typed in, before it is committed to the ledger.

use crate::constants::{PENALTY101_BONUS, PENALTY101_FINISH};
use crate::numbers::{is_score_entry, parse_score};
use crate::session::GameKind;

/// One-tap rewrite of a single score entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickEntry {
    Double,
    Quadruple,
    PlusTwoHundred,
    /// Player went out; may leave a negative entry.
    Finished,
    Set(i64),
}

impl QuickEntry {
    /// New entry text given the current one. Blank or unreadable text counts
    /// as 0.
    #[must_use]
    pub fn apply(self, current: &str) -> String {
        let value = parse_score(current);
        let next = match self {
            Self::Double => value.saturating_mul(2),
            Self::Quadruple => value.saturating_mul(4),
            Self::PlusTwoHundred => value.saturating_add(PENALTY101_BONUS),
            Self::Finished => value.saturating_add(PENALTY101_FINISH),
            Self::Set(n) => n,
        };
        next.to_string()
    }
}

/// A quick-entry button: translation key and the rewrite it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickPreset {
    pub key: &'static str,
    pub entry: QuickEntry,
}

const fn preset(key: &'static str, entry: QuickEntry) -> QuickPreset {
    QuickPreset { key, entry }
}

const PENALTY101_PRESETS: &[QuickPreset] = &[
    preset("quick.double", QuickEntry::Double),
    preset("quick.quadruple", QuickEntry::Quadruple),
    preset("quick.plus_200", QuickEntry::PlusTwoHundred),
    preset("quick.finished", QuickEntry::Finished),
];

const OKEY_PRESETS: &[QuickPreset] = &[
    preset("quick.okey.per", QuickEntry::Set(0)),
    preset("quick.okey.pair_out", QuickEntry::Set(1)),
    preset("quick.okey.triple_out", QuickEntry::Set(2)),
    preset("quick.okey.quad_out", QuickEntry::Set(3)),
    preset("quick.okey.free", QuickEntry::Set(4)),
    preset("quick.okey.pair_done", QuickEntry::Set(5)),
    preset("quick.okey.triple_done", QuickEntry::Set(6)),
    preset("quick.okey.quad_done", QuickEntry::Set(7)),
];

const BATAK_PRESETS: &[QuickPreset] = &[
    preset("quick.batak.trick", QuickEntry::Set(1)),
    preset("quick.batak.ace_of_hearts", QuickEntry::Set(1)),
    preset("quick.batak.ten_of_hearts", QuickEntry::Set(1)),
];

/// Quick-entry buttons offered for `kind`.
#[must_use]
pub const fn presets(kind: GameKind) -> &'static [QuickPreset] {
    match kind {
        GameKind::Okey => OKEY_PRESETS,
        GameKind::Batak => BATAK_PRESETS,
        GameKind::Penalty101 => PENALTY101_PRESETS,
        GameKind::Pisti => &[],
    }
}

/// Text buffer holding one entry per player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundDraft {
    entries: Vec<String>,
}

impl RoundDraft {
    #[must_use]
    pub fn new(players: usize) -> Self {
        Self {
            entries: vec![String::new(); players],
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, player: usize) -> Option<&str> {
        self.entries.get(player).map(String::as_str)
    }

    /// Replace one entry. Only empty or all-digit text is accepted; anything
    /// else is ignored and `false` returned.
    pub fn set_entry(&mut self, player: usize, text: &str) -> bool {
        match self.entries.get_mut(player) {
            Some(slot) if is_score_entry(text) => {
                text.clone_into(slot);
                true
            }
            _ => false,
        }
    }

    /// Rewrite one entry with a preset. Unknown seats are ignored.
    pub fn apply_quick(&mut self, player: usize, entry: QuickEntry) {
        if let Some(slot) = self.entries.get_mut(player) {
            *slot = entry.apply(slot);
        }
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(String::clear);
    }

    /// Match the seat count after players join or leave.
    pub fn resize(&mut self, players: usize) {
        self.entries.resize(players, String::new());
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|entry| entry.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_entry_filters_non_digits() {
        let mut draft = RoundDraft::new(2);
        assert!(draft.set_entry(0, "42"));
        assert!(!draft.set_entry(0, "4a"));
        assert!(!draft.set_entry(1, "-3"));
        assert!(!draft.set_entry(5, "1"));
        assert_eq!(draft.entries(), &["42".to_string(), String::new()]);
        assert!(draft.set_entry(0, ""));
        assert!(draft.is_blank());
    }

    #[test]
    fn arithmetic_presets_treat_blank_as_zero() {
        assert_eq!(QuickEntry::Double.apply(""), "0");
        assert_eq!(QuickEntry::Double.apply("35"), "70");
        assert_eq!(QuickEntry::Quadruple.apply("35"), "140");
        assert_eq!(QuickEntry::PlusTwoHundred.apply("x"), "200");
        assert_eq!(QuickEntry::Finished.apply(""), "-100");
        assert_eq!(QuickEntry::Set(7).apply("999"), "7");
    }

    #[test]
    fn quick_entries_can_leave_negative_text_the_keyboard_cannot_type() {
        let mut draft = RoundDraft::new(3);
        draft.apply_quick(1, QuickEntry::Finished);
        assert_eq!(draft.entry(1), Some("-100"));
        draft.clear();
        assert!(draft.is_blank());
        assert_eq!(draft.entries().len(), 3);
    }

    #[test]
    fn preset_tables_per_game() {
        assert_eq!(presets(GameKind::Okey).len(), 8);
        assert_eq!(presets(GameKind::Penalty101).len(), 4);
        assert!(presets(GameKind::Batak)
            .iter()
            .all(|preset| preset.entry == QuickEntry::Set(1)));
        assert!(presets(GameKind::Pisti).is_empty());
    }
}
