//! Saved-game archive.
//!
//! A single ordered list stored under [`ARCHIVE_KEY`]. Entries are appended
//! on save and only ever removed by explicit deletion.

use crate::constants::{ARCHIVE_KEY, SAVED_DATE_FORMAT, SAVED_TIME_FORMAT};
use crate::rules::{self, Outcome};
use crate::session::{GameKind, SessionRecord, StoredSession};
use crate::store::KeyValueStore;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    #[error("no saved game with id {0}")]
    NotFound(String),
    #[error("saved game {id} has unknown game `{name}`")]
    UnknownGame { id: String, name: String },
}

/// A snapshot of one table, as listed on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedGame {
    pub id: String,
    #[serde(alias = "oyunAdi")]
    pub game_name: String,
    #[serde(default, alias = "oyuncular")]
    pub players: Vec<String>,
    #[serde(default, alias = "skorlar")]
    pub rounds: Vec<Vec<i64>>,
    #[serde(default, alias = "cezalar", skip_serializing_if = "Option::is_none")]
    pub penalties: Option<Vec<Vec<i64>>>,
    #[serde(default, alias = "mesrubatlar", skip_serializing_if = "Option::is_none")]
    pub drink_counts: Option<BTreeMap<String, u32>>,
    #[serde(
        default,
        alias = "mesrubatFiyatlari",
        skip_serializing_if = "Option::is_none"
    )]
    pub drink_prices: Option<BTreeMap<String, f64>>,
    #[serde(default, alias = "elSayisi", skip_serializing_if = "Option::is_none")]
    pub hand_target: Option<u32>,
    #[serde(default, alias = "hedefSkor", skip_serializing_if = "Option::is_none")]
    pub target_score: Option<i64>,
    #[serde(default, alias = "kayitTarihi")]
    pub saved_date: String,
    #[serde(default, alias = "kayitSaati")]
    pub saved_time: String,
}

impl ArchivedGame {
    fn snapshot(record: &SessionRecord, id: String, at: &SavedAt) -> Self {
        let kind = record.kind;
        Self {
            id,
            game_name: kind.display_name().to_string(),
            players: record.players.clone(),
            rounds: record.rounds.clone(),
            penalties: Some(record.penalties.clone()),
            drink_counts: Some(record.drink_counts.clone()),
            drink_prices: Some(record.drink_prices.clone()),
            hand_target: matches!(kind, GameKind::Penalty101).then_some(record.hand_target),
            target_score: matches!(kind, GameKind::Pisti).then_some(record.target_score),
            saved_date: at.date.clone(),
            saved_time: at.time.clone(),
        }
    }

    /// Game kind from the stored display name, if it is one we know.
    #[must_use]
    pub fn kind(&self) -> Option<GameKind> {
        GameKind::from_display_name(&self.game_name).or_else(|| GameKind::from_slug(&self.game_name))
    }

    /// Rebuild a normalized session record from this snapshot.
    #[must_use]
    pub fn to_session(&self) -> Option<SessionRecord> {
        let kind = self.kind()?;
        let stored = StoredSession {
            game_kind: Some(kind),
            players: self.players.clone(),
            rounds: self.rounds.clone(),
            penalties: self.penalties.clone(),
            hand_target: self.hand_target,
            target_score: self.target_score,
            drink_counts: self.drink_counts.clone(),
            drink_prices: self.drink_prices.clone(),
        };
        Some(stored.normalize(kind))
    }

    /// Judge the snapshot with the same rules as a live table.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.to_session().map(|record| rules::evaluate(&record))
    }
}

/// When a game was saved: the id seed plus the rendered date and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAt {
    pub millis: i64,
    pub date: String,
    pub time: String,
}

impl SavedAt {
    #[must_use]
    pub fn from_datetime<Tz>(at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            millis: at.timestamp_millis(),
            date: at.format(SAVED_DATE_FORMAT).to_string(),
            time: at.format(SAVED_TIME_FORMAT).to_string(),
        }
    }
}

/// Every readable entry, oldest first. Entries that no longer parse are
/// skipped.
pub fn list<S: KeyValueStore + ?Sized>(store: &S) -> Vec<ArchivedGame> {
    store
        .get::<Vec<serde_json::Value>>(ARCHIVE_KEY)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| match serde_json::from_value(raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("skipping unreadable saved game: {err}");
                None
            }
        })
        .collect()
}

pub fn find<S: KeyValueStore + ?Sized>(store: &S, id: &str) -> Option<ArchivedGame> {
    list(store).into_iter().find(|entry| entry.id == id)
}

/// Append a snapshot of `record`. The id is the save instant in epoch
/// milliseconds, bumped until no other entry holds it.
pub fn save<S: KeyValueStore + ?Sized>(store: &S, record: &SessionRecord, at: &SavedAt) -> ArchivedGame {
    let mut entries = list(store);
    let mut millis = at.millis;
    while entries.iter().any(|entry| entry.id == millis.to_string()) {
        millis += 1;
    }
    let entry = ArchivedGame::snapshot(record, millis.to_string(), at);
    entries.push(entry.clone());
    store.set(ARCHIVE_KEY, &entries);
    log::info!("saved {} table as {}", record.kind, entry.id);
    entry
}

/// Remove the entry with `id`. Returns whether anything was removed.
pub fn delete<S: KeyValueStore + ?Sized>(store: &S, id: &str) -> bool {
    let mut entries = list(store);
    let before = entries.len();
    entries.retain(|entry| entry.id != id);
    if entries.len() == before {
        return false;
    }
    store.set(ARCHIVE_KEY, &entries);
    true
}

/// Copy a saved game over the active session for its kind.
///
/// # Errors
///
/// [`ArchiveError::NotFound`] for an unknown id and
/// [`ArchiveError::UnknownGame`] when the entry's game name isn't recognised.
pub fn load_into_active<S: KeyValueStore + ?Sized>(store: &S, id: &str) -> Result<GameKind, ArchiveError> {
    let entry = find(store, id).ok_or_else(|| ArchiveError::NotFound(id.to_string()))?;
    let record = entry.to_session().ok_or_else(|| ArchiveError::UnknownGame {
        id: entry.id.clone(),
        name: entry.game_name.clone(),
    })?;
    store.set(&record.storage_key(), &record);
    log::info!("resumed saved game {id} as the active {} table", record.kind);
    Ok(record.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger;
    use crate::rules::Standing;
    use crate::store::MemoryStore;
    use chrono::FixedOffset;

    fn at(millis: i64) -> SavedAt {
        SavedAt {
            millis,
            date: "19.10.2026".into(),
            time: "21:05".into(),
        }
    }

    fn pisti() -> SessionRecord {
        let record = SessionRecord::new(GameKind::Pisti, &["Ali", "Veli"]).unwrap();
        let record = ledger::set_target_score(&record, "101").unwrap();
        ledger::append_round(&record, &["60", "10"]).unwrap()
    }

    #[test]
    fn saved_at_renders_turkish_formats() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let when = offset.with_ymd_and_hms(2026, 3, 7, 9, 4, 0).unwrap();
        let saved = SavedAt::from_datetime(&when);
        assert_eq!(saved.date, "07.03.2026");
        assert_eq!(saved.time, "09:04");
        assert_eq!(saved.millis, when.timestamp_millis());
    }

    #[test]
    fn save_assigns_unique_ids() {
        let store = MemoryStore::new();
        let first = save(&store, &pisti(), &at(1000));
        let second = save(&store, &pisti(), &at(1000));
        let third = save(&store, &pisti(), &at(1000));
        assert_eq!(first.id, "1000");
        assert_eq!(second.id, "1001");
        assert_eq!(third.id, "1002");
        assert_eq!(list(&store).len(), 3);
    }

    #[test]
    fn delete_removes_only_the_matching_entry() {
        let store = MemoryStore::new();
        save(&store, &pisti(), &at(1));
        save(&store, &pisti(), &at(2));
        assert!(delete(&store, "1"));
        assert!(!delete(&store, "1"));
        let ids: Vec<_> = list(&store).into_iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn load_into_active_restores_thresholds() {
        let store = MemoryStore::new();
        let entry = save(&store, &pisti(), &at(5));
        assert_eq!(load_into_active(&store, &entry.id), Ok(GameKind::Pisti));
        let active: StoredSession = store.get(&GameKind::Pisti.storage_key()).unwrap();
        assert_eq!(active.normalize(GameKind::Pisti), pisti());
    }

    #[test]
    fn load_into_active_reports_missing_and_unknown_entries() {
        let store = MemoryStore::with_entry(
            ARCHIVE_KEY,
            r#"[{"id":"9","oyunAdi":"Tavla","oyuncular":["A","B"],"skorlar":[[],[]],"kayitTarihi":"1.1.2024","kayitSaati":"10:00"}]"#,
        );
        assert_eq!(
            load_into_active(&store, "nope"),
            Err(ArchiveError::NotFound("nope".into()))
        );
        assert!(matches!(
            load_into_active(&store, "9"),
            Err(ArchiveError::UnknownGame { .. })
        ));
    }

    #[test]
    fn legacy_entries_parse_and_map_names_case_insensitively() {
        let store = MemoryStore::with_entry(
            ARCHIVE_KEY,
            r#"[
                {"id":"1","oyunAdi":"CEZALI 101","oyuncular":["A","B"],"skorlar":[[450],[430]],"cezalar":[[],[100]],"elSayisi":1,"kayitTarihi":"1.1.2024","kayitSaati":"10:00"},
                {"broken":true},
                {"id":"2","oyunAdi":"okey","oyuncular":["A","B"],"skorlar":[[1],[2]],"kayitTarihi":"1.1.2024","kayitSaati":"10:00"}
            ]"#,
        );
        let entries = list(&store);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind(), Some(GameKind::Penalty101));
        assert_eq!(entries[1].kind(), Some(GameKind::Okey));

        let outcome = entries[0].outcome().unwrap();
        assert!(outcome.finished);
        assert_eq!(outcome.loser(), Some(1));
        assert_eq!(outcome.verdict.map(|v| v.standing), Some(Standing::Loser));
        assert!(!entries[1].outcome().unwrap().finished);
    }
}
