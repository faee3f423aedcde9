//! Scoreboard state and the actions the page can raise.
//!
//! [`ScoreboardState::dispatch`] is the only place UI events turn into ledger
//! calls, so the whole page flow runs natively in tests against a
//! [`yazboz_core::MemoryStore`].

use crate::i18n;
use yazboz_core::{
    EditSession, EditTarget, GameKind, KeyValueStore, LedgerError, QuickEntry, RoundDraft,
    SavedAt, SessionRecord, Table, ledger,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreAction {
    SetEntry { player: usize, text: String },
    Quick { player: usize, entry: QuickEntry },
    AppendRound,
    BeginEdit(EditTarget),
    EditText(String),
    CommitEdit,
    CancelEdit,
    SelectPenaltyPlayer(Option<usize>),
    PenaltyText(String),
    AddPenalty,
    DeletePenalty { player: usize, index: usize },
    SetTarget(i64),
    AddDrink(String),
    RemoveDrink(String),
    SetPrice { drink: String, text: String },
    NewGame,
    Save,
    Exit,
}

/// What the page has to do after an action besides re-rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The session is gone; go back to the landing page.
    LeaveTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardState {
    pub record: SessionRecord,
    pub draft: RoundDraft,
    pub edit: Option<EditSession>,
    pub penalty_player: Option<usize>,
    pub penalty_text: String,
    pub notice: Option<String>,
}

impl ScoreboardState {
    #[must_use]
    pub fn new(record: SessionRecord) -> Self {
        let draft = RoundDraft::new(record.player_count());
        Self {
            record,
            draft,
            edit: None,
            penalty_player: None,
            penalty_text: String::new(),
            notice: None,
        }
    }

    /// The stored table for `kind`, or `None` when nothing was set up.
    pub fn load<S: KeyValueStore>(store: S, kind: GameKind) -> Option<Self> {
        Table::open(store, kind).map(|table| Self::new(table.record().clone()))
    }

    #[must_use]
    pub const fn kind(&self) -> GameKind {
        self.record.kind
    }

    fn absorb(&mut self, result: Result<&SessionRecord, LedgerError>) -> bool {
        match result {
            Ok(record) => {
                self.record = record.clone();
                self.notice = None;
                true
            }
            Err(err) if err.is_user_facing() => {
                self.notice = Some(i18n::t("scoreboard.fill_all_scores"));
                false
            }
            Err(_) => false,
        }
    }

    /// Apply one action against `store`; `now` is only called when saving.
    pub fn dispatch<S, F>(&mut self, store: S, action: ScoreAction, now: F) -> Effect
    where
        S: KeyValueStore,
        F: FnOnce() -> SavedAt,
    {
        let mut table = Table::from_parts(store, self.record.clone());
        match action {
            ScoreAction::SetEntry { player, text } => {
                self.draft.set_entry(player, &text);
            }
            ScoreAction::Quick { player, entry } => self.draft.apply_quick(player, entry),
            ScoreAction::AppendRound => {
                let result = table.append_round(&mut self.draft);
                self.absorb(result);
            }
            ScoreAction::BeginEdit(target) => {
                self.edit = Some(EditSession::begin(&self.record, target));
            }
            ScoreAction::EditText(text) => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.text = text;
                }
            }
            ScoreAction::CommitEdit => {
                if let Some(edit) = self.edit.take() {
                    let result = table.apply(|record| edit.commit(record));
                    self.absorb(result);
                }
            }
            ScoreAction::CancelEdit => self.edit = None,
            ScoreAction::SelectPenaltyPlayer(player) => self.penalty_player = player,
            ScoreAction::PenaltyText(text) => self.penalty_text = text,
            ScoreAction::AddPenalty => {
                let result = table.add_penalty(self.penalty_player, &self.penalty_text);
                if self.absorb(result) {
                    self.penalty_text.clear();
                    self.penalty_player = None;
                }
            }
            ScoreAction::DeletePenalty { player, index } => {
                let result = table.delete_penalty(player, index);
                self.absorb(result);
            }
            ScoreAction::SetTarget(target) => {
                let result = table.apply(|record| ledger::set_target_score(record, &target.to_string()));
                self.absorb(result);
            }
            ScoreAction::AddDrink(drink) => self.record = table.add_drink(&drink).clone(),
            ScoreAction::RemoveDrink(drink) => self.record = table.remove_drink(&drink).clone(),
            ScoreAction::SetPrice { drink, text } => {
                let result = table.set_drink_price(&drink, &text);
                self.absorb(result);
            }
            ScoreAction::NewGame => {
                let record = table.reset().clone();
                *self = Self::new(record);
            }
            ScoreAction::Save => {
                table.save_to_archive(&now());
                self.notice = Some(i18n::t("scoreboard.saved"));
            }
            ScoreAction::Exit => {
                table.close();
                return Effect::LeaveTable;
            }
        }
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yazboz_core::constants::PISTI_TARGET_PRESETS;
    use yazboz_core::{MemoryStore, ScoreKeeper};

    fn stamp() -> SavedAt {
        SavedAt {
            millis: 7,
            date: "19.10.2026".into(),
            time: "22:00".into(),
        }
    }

    fn state(store: &MemoryStore, kind: GameKind) -> ScoreboardState {
        ScoreKeeper::new(store.clone())
            .start_table(kind, &["Ali", "Veli"])
            .unwrap();
        ScoreboardState::load(store.clone(), kind).unwrap()
    }

    fn send(state: &mut ScoreboardState, store: &MemoryStore, action: ScoreAction) -> Effect {
        state.dispatch(store.clone(), action, stamp)
    }

    #[test]
    fn blank_entry_surfaces_a_notice() {
        crate::i18n::set_lang("tr");
        let store = MemoryStore::new();
        let mut board = state(&store, GameKind::Pisti);
        send(&mut board, &store, ScoreAction::SetEntry { player: 0, text: "12".into() });
        send(&mut board, &store, ScoreAction::AppendRound);
        assert_eq!(board.record.round_count(), 0);
        assert_eq!(
            board.notice.as_deref(),
            Some("Lütfen tüm oyuncuların skorlarını girin!")
        );

        send(&mut board, &store, ScoreAction::SetEntry { player: 1, text: "4".into() });
        send(&mut board, &store, ScoreAction::AppendRound);
        assert_eq!(board.record.rounds, vec![vec![12], vec![4]]);
        assert!(board.notice.is_none());
        assert!(board.draft.is_blank());
    }

    #[test]
    fn edits_prefill_and_commit() {
        let store = MemoryStore::new();
        let mut board = state(&store, GameKind::Okey);
        send(&mut board, &store, ScoreAction::BeginEdit(EditTarget::Name { player: 1 }));
        assert_eq!(board.edit.as_ref().map(|e| e.text.as_str()), Some("Veli"));
        send(&mut board, &store, ScoreAction::EditText("Ayşe".into()));
        send(&mut board, &store, ScoreAction::CommitEdit);
        assert!(board.edit.is_none());
        assert_eq!(board.record.players[1], "Ayşe");
        assert_eq!(ScoreboardState::load(store, GameKind::Okey).unwrap().record.players[1], "Ayşe");
    }

    #[test]
    fn invalid_edits_are_dropped_silently() {
        let store = MemoryStore::new();
        let mut board = state(&store, GameKind::Penalty101);
        send(&mut board, &store, ScoreAction::BeginEdit(EditTarget::HandTarget));
        send(&mut board, &store, ScoreAction::EditText("abc".into()));
        send(&mut board, &store, ScoreAction::CommitEdit);
        assert_eq!(board.record.hand_target, 9);
        assert!(board.notice.is_none());
    }

    #[test]
    fn penalty_flow_requires_a_selected_player() {
        let store = MemoryStore::new();
        let mut board = state(&store, GameKind::Penalty101);
        send(&mut board, &store, ScoreAction::PenaltyText("101".into()));
        send(&mut board, &store, ScoreAction::AddPenalty);
        assert!(board.record.penalties.iter().all(Vec::is_empty));

        send(&mut board, &store, ScoreAction::SelectPenaltyPlayer(Some(0)));
        send(&mut board, &store, ScoreAction::AddPenalty);
        assert_eq!(board.record.penalties[0], vec![101]);
        assert!(board.penalty_text.is_empty());
        assert_eq!(board.penalty_player, None);

        send(&mut board, &store, ScoreAction::PenaltyText("50".into()));
        send(&mut board, &store, ScoreAction::AddPenalty);
        assert_eq!(board.record.penalties[0], vec![101]);
        assert_eq!(board.penalty_text, "50");

        send(&mut board, &store, ScoreAction::DeletePenalty { player: 0, index: 0 });
        assert!(board.record.penalties[0].is_empty());
    }

    #[test]
    fn new_game_save_and_exit() {
        let store = MemoryStore::new();
        let mut board = state(&store, GameKind::Batak);
        send(&mut board, &store, ScoreAction::AddDrink("çay".into()));
        send(&mut board, &store, ScoreAction::SetPrice { drink: "çay".into(), text: "10".into() });
        send(&mut board, &store, ScoreAction::Quick { player: 0, entry: QuickEntry::Set(1) });
        assert_eq!(board.draft.entry(0), Some("1"));

        assert_eq!(send(&mut board, &store, ScoreAction::Save), Effect::None);
        assert_eq!(ScoreKeeper::new(store.clone()).saved_games().len(), 1);

        send(&mut board, &store, ScoreAction::NewGame);
        assert!(board.record.drink_counts.is_empty());
        assert_eq!(board.record.drink_prices.get("çay"), Some(&10.0));
        assert!(board.draft.is_blank());

        assert_eq!(send(&mut board, &store, ScoreAction::Exit), Effect::LeaveTable);
        assert!(ScoreboardState::load(store, GameKind::Batak).is_none());
    }

    #[test]
    fn target_presets_replace_the_pisti_target() {
        let store = MemoryStore::new();
        let mut board = state(&store, GameKind::Pisti);
        for target in PISTI_TARGET_PRESETS {
            send(&mut board, &store, ScoreAction::SetTarget(target));
            assert_eq!(board.record.target_score, target);
        }
        let stored = ScoreboardState::load(store.clone(), GameKind::Pisti).unwrap();
        assert_eq!(stored.record.target_score, 501);

        let mut okey = state(&store, GameKind::Okey);
        send(&mut okey, &store, ScoreAction::SetTarget(251));
        assert_eq!(okey.record.target_score, 151);
    }
}
