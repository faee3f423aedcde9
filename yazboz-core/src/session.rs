//! Session records: the full state of one game table.
//!
//! Records are persisted as [`StoredSession`], a shape where every field is
//! optional so that records written before a field existed still parse.
//! [`StoredSession::normalize`] fills the gaps and is applied on every load.

use crate::constants::{
    DEFAULT_HAND_TARGET, DEFAULT_TARGET_SCORE, MAX_PLAYERS, MIN_PLAYERS, SESSION_KEY_PREFIX,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The four games the table can keep score for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameKind {
    #[serde(rename = "okey")]
    Okey,
    #[serde(rename = "pisti")]
    Pisti,
    #[serde(rename = "batak")]
    Batak,
    #[serde(rename = "cezali-101")]
    Penalty101,
}

impl GameKind {
    pub const ALL: [Self; 4] = [Self::Okey, Self::Pisti, Self::Batak, Self::Penalty101];

    /// URL and storage-key identifier.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Okey => "okey",
            Self::Pisti => "pisti",
            Self::Batak => "batak",
            Self::Penalty101 => "cezali-101",
        }
    }

    /// Name shown on the table list and stored in saved games.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Okey => "Normal Okey",
            Self::Pisti => "Pişti",
            Self::Batak => "Batak",
            Self::Penalty101 => "Cezalı 101",
        }
    }

    #[must_use]
    pub fn storage_key(self) -> String {
        format!("{SESSION_KEY_PREFIX}{}", self.slug())
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Resolve a saved game's display name, including the short names older
    /// saves used.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "normal okey" | "okey" => Some(Self::Okey),
            "pişti" | "pisti" => Some(Self::Pisti),
            "batak" => Some(Self::Batak),
            "cezalı 101" | "cezali 101" | "cezali-101" | "101" => Some(Self::Penalty101),
            _ => None,
        }
    }

    /// Only Cezalı 101 keeps a per-player penalty list.
    #[must_use]
    pub const fn has_penalties(self) -> bool {
        matches!(self, Self::Penalty101)
    }

    /// Cezalı 101 tables price drinks in kuruş; the rest in whole lira.
    #[must_use]
    pub const fn allows_fractional_prices(self) -> bool {
        matches!(self, Self::Penalty101)
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a table seats {min} to {max} players, got {count}")]
    PlayerCount { count: usize, min: usize, max: usize },
    #[error("player {0} has no name")]
    BlankName(usize),
}

/// One table's complete state.
///
/// `rounds` and `penalties` always hold one row per player. Every row of
/// `rounds` has the same length. `penalties` rows are independent and stay
/// empty for games without penalties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "StoredSession")]
pub struct SessionRecord {
    pub kind: GameKind,
    pub players: Vec<String>,
    pub rounds: Vec<Vec<i64>>,
    pub penalties: Vec<Vec<i64>>,
    pub hand_target: u32,
    pub target_score: i64,
    pub drink_counts: BTreeMap<String, u32>,
    pub drink_prices: BTreeMap<String, f64>,
}

impl SessionRecord {
    /// Seat a new table.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] when the player count is outside 2..=6 or a
    /// name is blank after trimming.
    pub fn new<S: AsRef<str>>(kind: GameKind, names: &[S]) -> Result<Self, SetupError> {
        let count = names.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(SetupError::PlayerCount {
                count,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        let mut players = Vec::with_capacity(count);
        for (index, name) in names.iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(SetupError::BlankName(index));
            }
            players.push(name.to_string());
        }
        Ok(Self {
            kind,
            players,
            rounds: vec![Vec::new(); count],
            penalties: vec![Vec::new(); count],
            hand_target: DEFAULT_HAND_TARGET,
            target_score: DEFAULT_TARGET_SCORE,
            drink_counts: BTreeMap::new(),
            drink_prices: BTreeMap::new(),
        })
    }

    /// Parse stored JSON and normalize it for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a session object.
    pub fn from_json(json: &str, kind: GameKind) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<StoredSession>(json).map(|stored| stored.normalize(kind))
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Completed rounds. Rows are equal length, so the first row decides.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn storage_key(&self) -> String {
        self.kind.storage_key()
    }
}

/// Persisted shape of a [`SessionRecord`].
///
/// Keys written by the first browser release are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    #[serde(
        default,
        alias = "oyun",
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub game_kind: Option<GameKind>,
    #[serde(default, alias = "oyuncular")]
    pub players: Vec<String>,
    #[serde(default, alias = "skorlar")]
    pub rounds: Vec<Vec<i64>>,
    #[serde(default, alias = "cezalar", skip_serializing_if = "Option::is_none")]
    pub penalties: Option<Vec<Vec<i64>>>,
    #[serde(default, alias = "elSayisi", skip_serializing_if = "Option::is_none")]
    pub hand_target: Option<u32>,
    #[serde(default, alias = "hedefSkor", skip_serializing_if = "Option::is_none")]
    pub target_score: Option<i64>,
    #[serde(default, alias = "mesrubatlar", skip_serializing_if = "Option::is_none")]
    pub drink_counts: Option<BTreeMap<String, u32>>,
    #[serde(
        default,
        alias = "mesrubatFiyatlari",
        skip_serializing_if = "Option::is_none"
    )]
    pub drink_prices: Option<BTreeMap<String, f64>>,
}

/// Older records stored a free-form game name; anything unrecognised is
/// dropped rather than failing the whole record.
fn lenient_kind<'de, D>(deserializer: D) -> Result<Option<GameKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|name| {
        GameKind::from_slug(&name).or_else(|| GameKind::from_display_name(&name))
    }))
}

impl StoredSession {
    /// Back-fill every field missing from an older record.
    ///
    /// The stored kind is ignored in favour of `kind`, which comes from the
    /// storage key the record was read from. Idempotent.
    #[must_use]
    pub fn normalize(self, kind: GameKind) -> SessionRecord {
        let player_count = self.players.len();

        let mut rounds = self.rounds;
        rounds.resize_with(player_count, Vec::new);
        let depth = rounds.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rounds {
            if row.len() < depth {
                log::warn!("padding short round row ({} of {depth})", row.len());
                row.resize(depth, 0);
            }
        }

        let mut penalties = if kind.has_penalties() {
            self.penalties.unwrap_or_default()
        } else {
            Vec::new()
        };
        penalties.resize_with(player_count, Vec::new);

        SessionRecord {
            kind,
            players: self.players,
            rounds,
            penalties,
            hand_target: self
                .hand_target
                .filter(|target| *target > 0)
                .unwrap_or(DEFAULT_HAND_TARGET),
            target_score: self
                .target_score
                .filter(|target| *target > 0)
                .unwrap_or(DEFAULT_TARGET_SCORE),
            drink_counts: self.drink_counts.unwrap_or_default(),
            drink_prices: self.drink_prices.unwrap_or_default(),
        }
    }
}

impl From<SessionRecord> for StoredSession {
    fn from(record: SessionRecord) -> Self {
        let kind = record.kind;
        Self {
            game_kind: Some(kind),
            players: record.players,
            rounds: record.rounds,
            penalties: kind.has_penalties().then_some(record.penalties),
            hand_target: matches!(kind, GameKind::Penalty101).then_some(record.hand_target),
            target_score: matches!(kind, GameKind::Pisti).then_some(record.target_score),
            drink_counts: Some(record.drink_counts),
            drink_prices: Some(record.drink_prices),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_names_and_seats_empty_rows() {
        let record = SessionRecord::new(GameKind::Okey, &[" Ali ", "Veli", "Ayşe"]).unwrap();
        assert_eq!(record.players, vec!["Ali", "Veli", "Ayşe"]);
        assert_eq!(record.rounds, vec![Vec::<i64>::new(); 3]);
        assert_eq!(record.round_count(), 0);
        assert_eq!(record.target_score, DEFAULT_TARGET_SCORE);
    }

    #[test]
    fn new_rejects_bad_tables() {
        assert_eq!(
            SessionRecord::new(GameKind::Batak, &["solo"]),
            Err(SetupError::PlayerCount {
                count: 1,
                min: 2,
                max: 6
            })
        );
        let seven = ["a", "b", "c", "d", "e", "f", "g"];
        assert!(SessionRecord::new(GameKind::Batak, &seven).is_err());
        assert_eq!(
            SessionRecord::new(GameKind::Batak, &["a", "  "]),
            Err(SetupError::BlankName(1))
        );
    }

    #[test]
    fn kinds_resolve_from_slugs_and_names() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_slug(kind.slug()), Some(kind));
            assert_eq!(GameKind::from_display_name(kind.display_name()), Some(kind));
        }
        assert_eq!(GameKind::from_display_name("101"), Some(GameKind::Penalty101));
        assert_eq!(GameKind::from_display_name("OKEY"), Some(GameKind::Okey));
        assert_eq!(GameKind::from_display_name("tavla"), None);
        assert_eq!(GameKind::Pisti.storage_key(), "oyunVerisi_pisti");
    }

    #[test]
    fn missing_drink_counts_backfill_to_empty() {
        let json = r#"{"players":["A","B"],"rounds":[[10,5],[3,8]],"drinkPrices":{"çay":10.0}}"#;
        let record = SessionRecord::from_json(json, GameKind::Okey).unwrap();
        assert!(record.drink_counts.is_empty());
        assert_eq!(record.players, vec!["A", "B"]);
        assert_eq!(record.rounds, vec![vec![10, 5], vec![3, 8]]);
        assert_eq!(record.drink_prices.get("çay"), Some(&10.0));
    }

    #[test]
    fn legacy_keys_load_with_defaults() {
        let json = r#"{"oyun":"cezali-101","oyuncular":["A","B","C"],"skorlar":[[1],[2],[3]]}"#;
        let record = SessionRecord::from_json(json, GameKind::Penalty101).unwrap();
        assert_eq!(record.penalties, vec![Vec::<i64>::new(); 3]);
        assert_eq!(record.hand_target, DEFAULT_HAND_TARGET);
        assert!(record.drink_prices.is_empty());
        assert_eq!(record.round_count(), 1);
    }

    #[test]
    fn unknown_legacy_game_name_does_not_fail_the_load() {
        let json = r#"{"oyun":"Tavla","oyuncular":["A","B"],"skorlar":[[],[]]}"#;
        let record = SessionRecord::from_json(json, GameKind::Batak).unwrap();
        assert_eq!(record.kind, GameKind::Batak);
    }

    #[test]
    fn zero_thresholds_fall_back_to_defaults() {
        let json = r#"{"players":["A","B"],"rounds":[[],[]],"targetScore":0}"#;
        let record = SessionRecord::from_json(json, GameKind::Pisti).unwrap();
        assert_eq!(record.target_score, DEFAULT_TARGET_SCORE);
    }

    #[test]
    fn ragged_rows_are_padded() {
        let json = r#"{"players":["A","B"],"rounds":[[4,4]]}"#;
        let record = SessionRecord::from_json(json, GameKind::Okey).unwrap();
        assert_eq!(record.rounds, vec![vec![4, 4], vec![0, 0]]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let json = r#"{"players":["A","B"],"rounds":[[1],[2]],"penalties":[[5]]}"#;
        let once = SessionRecord::from_json(json, GameKind::Penalty101).unwrap();
        let stored = serde_json::to_string(&once).unwrap();
        let twice = SessionRecord::from_json(&stored, GameKind::Penalty101).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn serialized_shape_only_carries_variant_fields() {
        let okey = SessionRecord::new(GameKind::Okey, &["A", "B"]).unwrap();
        let value = serde_json::to_value(&okey).unwrap();
        assert_eq!(value["gameKind"], "okey");
        assert!(value.get("penalties").is_none());
        assert!(value.get("targetScore").is_none());
        assert_eq!(value["drinkCounts"], serde_json::json!({}));

        let pisti = SessionRecord::new(GameKind::Pisti, &["A", "B"]).unwrap();
        let value = serde_json::to_value(&pisti).unwrap();
        assert_eq!(value["targetScore"], 151);
        assert!(value.get("handTarget").is_none());
    }
}
