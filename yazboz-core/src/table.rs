//! A live table: a session record bound to the store it persists in.
//!
//! Every mutation re-reads the stored record, applies one ledger operation
//! and writes the result back before returning. There is no conflict
//! detection; the last write to a key wins.

use crate::archive::{self, ArchivedGame, SavedAt};
use crate::draft::RoundDraft;
use crate::ledger::{self, LedgerError};
use crate::rules::{self, Outcome};
use crate::session::{GameKind, SessionRecord, SetupError, StoredSession};
use crate::store::KeyValueStore;

pub struct Table<S: KeyValueStore> {
    store: S,
    record: SessionRecord,
}

impl<S: KeyValueStore> Table<S> {
    /// The stored table for `kind`, normalized. `None` when nothing is
    /// stored, which callers treat as "go set one up".
    pub fn open(store: S, kind: GameKind) -> Option<Self> {
        let record = load(&store, kind)?;
        Some(Self { store, record })
    }

    /// Seat a new table, replacing whatever was stored for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] for a bad player list; nothing is written.
    pub fn create<N: AsRef<str>>(store: S, kind: GameKind, names: &[N]) -> Result<Self, SetupError> {
        let record = SessionRecord::new(kind, names)?;
        store.set(&record.storage_key(), &record);
        log::debug!("seated {} players at the {kind} table", record.player_count());
        Ok(Self { store, record })
    }

    /// Wrap an existing record without touching the store.
    pub const fn from_parts(store: S, record: SessionRecord) -> Self {
        Self { store, record }
    }

    pub const fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub const fn kind(&self) -> GameKind {
        self.record.kind
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        rules::evaluate(&self.record)
    }

    /// Run one ledger operation against the freshest stored copy and persist
    /// the result.
    ///
    /// # Errors
    ///
    /// Whatever `op` rejects; the store and the held record are unchanged.
    pub fn apply<F>(&mut self, op: F) -> Result<&SessionRecord, LedgerError>
    where
        F: FnOnce(&SessionRecord) -> Result<SessionRecord, LedgerError>,
    {
        let current = load(&self.store, self.kind()).unwrap_or_else(|| self.record.clone());
        let next = op(&current).inspect_err(|err| {
            log::debug!("{} table rejected an edit: {err}", self.kind());
        })?;
        self.store.set(&next.storage_key(), &next);
        self.record = next;
        Ok(&self.record)
    }

    fn apply_infallible(&mut self, op: impl FnOnce(&SessionRecord) -> SessionRecord) -> &SessionRecord {
        let current = load(&self.store, self.kind()).unwrap_or_else(|| self.record.clone());
        let next = op(&current);
        self.store.set(&next.storage_key(), &next);
        self.record = next;
        &self.record
    }

    /// Commit the draft as a new round and clear it.
    ///
    /// # Errors
    ///
    /// See [`ledger::append_round`]. The draft keeps its entries on failure.
    pub fn append_round(&mut self, draft: &mut RoundDraft) -> Result<&SessionRecord, LedgerError> {
        let entries = draft.entries().to_vec();
        self.apply(|record| ledger::append_round(record, &entries))?;
        draft.clear();
        Ok(&self.record)
    }

    /// # Errors
    ///
    /// See [`ledger::add_penalty`].
    pub fn add_penalty(&mut self, player: Option<usize>, amount: &str) -> Result<&SessionRecord, LedgerError> {
        self.apply(|record| ledger::add_penalty(record, player, amount))
    }

    /// # Errors
    ///
    /// See [`ledger::delete_penalty`].
    pub fn delete_penalty(&mut self, player: usize, index: usize) -> Result<&SessionRecord, LedgerError> {
        self.apply(|record| ledger::delete_penalty(record, player, index))
    }

    pub fn add_drink(&mut self, drink: &str) -> &SessionRecord {
        self.apply_infallible(|record| ledger::add_drink(record, drink))
    }

    pub fn remove_drink(&mut self, drink: &str) -> &SessionRecord {
        self.apply_infallible(|record| ledger::remove_drink(record, drink))
    }

    /// # Errors
    ///
    /// See [`ledger::set_drink_price`].
    pub fn set_drink_price(&mut self, drink: &str, price: &str) -> Result<&SessionRecord, LedgerError> {
        self.apply(|record| ledger::set_drink_price(record, drink, price))
    }

    /// Start over with the same players.
    pub fn reset(&mut self) -> &SessionRecord {
        self.apply_infallible(ledger::reset)
    }

    pub fn save_to_archive(&self, at: &SavedAt) -> ArchivedGame {
        archive::save(&self.store, &self.record, at)
    }

    /// Leave the table: the stored session is removed.
    pub fn close(self) -> S {
        self.store.remove(&self.record.storage_key());
        log::debug!("closed the {} table", self.record.kind);
        self.store
    }
}

fn load<S: KeyValueStore + ?Sized>(store: &S, kind: GameKind) -> Option<SessionRecord> {
    store
        .get::<StoredSession>(&kind.storage_key())
        .map(|stored| stored.normalize(kind))
}
