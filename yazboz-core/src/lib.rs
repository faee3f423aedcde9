//! Yazboz Scorekeeping Engine
//!
//! Platform-agnostic core for the Yazboz table companion: session records,
//! round/penalty/drink ledgers, per-game outcome rules and the saved-game
//! archive. Nothing here touches a browser; persistence goes through
//! [`KeyValueStore`].

pub mod archive;
pub mod constants;
pub mod draft;
pub mod drinks;
pub mod edit;
pub mod ledger;
pub mod numbers;
pub mod rules;
pub mod session;
pub mod store;
pub mod table;

pub use archive::{ArchiveError, ArchivedGame, SavedAt};
pub use draft::{QuickEntry, QuickPreset, RoundDraft, presets};
pub use drinks::{DrinkCatalog, DrinkKind, drink_bill, format_bill};
pub use edit::{EditSession, EditTarget};
pub use ledger::LedgerError;
pub use rules::{
    Outcome, Standing, Verdict, evaluate, final_scores, penalty_totals, round_totals,
};
pub use session::{GameKind, SessionRecord, SetupError, StoredSession};
pub use store::{KeyValueStore, MemoryStore, UnavailableStore};
pub use table::Table;

/// Entry point for a front-end: owns the store handle and the drink catalog.
pub struct ScoreKeeper<S>
where
    S: KeyValueStore + Clone,
{
    store: S,
    catalog: DrinkCatalog,
}

impl<S> ScoreKeeper<S>
where
    S: KeyValueStore + Clone,
{
    /// Create a keeper over `store` with the bundled drink catalog.
    pub fn new(store: S) -> Self {
        Self::with_catalog(store, DrinkCatalog::load_default())
    }

    pub const fn with_catalog(store: S, catalog: DrinkCatalog) -> Self {
        Self { store, catalog }
    }

    pub const fn catalog(&self) -> &DrinkCatalog {
        &self.catalog
    }

    /// The active table for `kind`, if one is stored.
    pub fn open_table(&self, kind: GameKind) -> Option<Table<S>> {
        Table::open(self.store.clone(), kind)
    }

    /// Seat a new table for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] for a bad player list.
    pub fn start_table<N: AsRef<str>>(&self, kind: GameKind, names: &[N]) -> Result<Table<S>, SetupError> {
        Table::create(self.store.clone(), kind, names)
    }

    /// Games with a stored session, in [`GameKind::ALL`] order.
    pub fn active_kinds(&self) -> Vec<GameKind> {
        GameKind::ALL
            .into_iter()
            .filter(|kind| self.store.read(&kind.storage_key()).is_some())
            .collect()
    }

    /// Drop the active session for `kind` without opening it.
    pub fn discard_table(&self, kind: GameKind) {
        self.store.remove(&kind.storage_key());
    }

    pub fn saved_games(&self) -> Vec<ArchivedGame> {
        archive::list(&self.store)
    }

    pub fn delete_saved(&self, id: &str) -> bool {
        archive::delete(&self.store, id)
    }

    /// Make a saved game the active table for its kind and open it.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] if the entry is missing or its game unknown.
    pub fn resume_saved(&self, id: &str) -> Result<Table<S>, ArchiveError> {
        let kind = archive::load_into_active(&self.store, id)?;
        self.open_table(kind)
            .ok_or_else(|| ArchiveError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved_at(millis: i64) -> SavedAt {
        SavedAt {
            millis,
            date: "01.01.2026".into(),
            time: "20:00".into(),
        }
    }

    #[test]
    fn keeper_starts_saves_and_resumes_tables() {
        let keeper = ScoreKeeper::new(MemoryStore::new());
        let mut table = keeper
            .start_table(GameKind::Penalty101, &["Ali", "Veli"])
            .unwrap();
        let mut draft = RoundDraft::new(2);
        draft.set_entry(0, "120");
        draft.set_entry(1, "80");
        table.append_round(&mut draft).unwrap();
        table.add_penalty(Some(0), "101").unwrap();
        let entry = table.save_to_archive(&saved_at(42));
        table.close();

        assert!(keeper.active_kinds().is_empty());
        assert_eq!(keeper.saved_games().len(), 1);

        let resumed = keeper.resume_saved(&entry.id).unwrap();
        assert_eq!(resumed.record().penalties[0], vec![101]);
        assert_eq!(keeper.active_kinds(), vec![GameKind::Penalty101]);
        assert_eq!(final_scores(&resumed.record().rounds, &resumed.record().penalties), vec![221, 80]);
    }

    #[test]
    fn keeper_degrades_without_storage() {
        let keeper = ScoreKeeper::new(UnavailableStore);
        assert!(keeper.open_table(GameKind::Okey).is_none());
        assert!(keeper.saved_games().is_empty());
        assert!(!keeper.delete_saved("1"));
        assert!(keeper.resume_saved("1").is_err());
    }

    #[test]
    fn discard_table_removes_only_that_kind() {
        let keeper = ScoreKeeper::new(MemoryStore::new());
        keeper.start_table(GameKind::Okey, &["A", "B"]).unwrap();
        keeper.start_table(GameKind::Batak, &["A", "B", "C"]).unwrap();
        keeper.discard_table(GameKind::Okey);
        assert_eq!(keeper.active_kinds(), vec![GameKind::Batak]);
        assert_eq!(keeper.catalog().drinks.len(), 8);
    }
}
